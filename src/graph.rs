//! Exon/junction adjacency graph.
//!
//! Nodes are dense integer ids handed out once from the canonical location
//! strings; edges carry one of two labels. An edge `x -d-> y` reads
//! "x is d of y", so every triple `(e, d, j)` is stored as `e -d-> j` plus
//! the inverse `j -opposite(d)-> e`.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::EventError;
use crate::model::types::NodeId;
use crate::triples::Triple;
use crate::types::Direction;

/// Bijection between location strings and dense ids.
///
/// Exons take ids `0..n_exons` in order of first appearance, junctions
/// follow in the same manner, so the exon/junction role of a node is a
/// range check.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    n_exons: usize,
}

impl NodeIndex {
    pub fn from_triples<'a, I>(triples: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = &'a Triple> + Clone,
    {
        let mut index = NodeIndex::default();

        for t in triples.clone() {
            index.intern(&t.exon);
        }
        index.n_exons = index.names.len();

        for t in triples {
            if let Some(&id) = index.ids.get(&t.junction) {
                if id < index.n_exons {
                    return Err(EventError::invalid_triple(
                        &t.exon,
                        &t.junction,
                        "location is used both as an exon and as a junction",
                    ));
                }
                continue;
            }
            index.intern(&t.junction);
        }

        Ok(index)
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn n_exons(&self) -> usize {
        self.n_exons
    }

    pub fn n_junctions(&self) -> usize {
        self.names.len() - self.n_exons
    }

    #[inline]
    pub fn is_exon(&self, id: NodeId) -> bool {
        id < self.n_exons
    }

    pub fn exon_ids(&self) -> Range<NodeId> {
        0..self.n_exons
    }

    pub fn junction_ids(&self) -> Range<NodeId> {
        self.n_exons..self.names.len()
    }
}

/// Adjacency lists indexed by node id and relation.
///
/// Built once, then only queried; lookups cost the out-degree of the node.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    adjacency: Vec<[Vec<NodeId>; 2]>,
    n_edges: usize,
}

impl AdjacencyGraph {
    pub fn with_nodes(n: usize) -> Self {
        Self {
            adjacency: vec![[Vec::new(), Vec::new()]; n],
            n_edges: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Directed edges, inverse edges included.
    pub fn edge_count(&self) -> usize {
        self.n_edges
    }

    /// Store `from -relation-> to` and its inverse.
    ///
    /// Returns false (and changes nothing) if the pair was already present.
    pub fn insert(&mut self, from: NodeId, relation: Direction, to: NodeId) -> bool {
        let needed = from.max(to) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize_with(needed, || [Vec::new(), Vec::new()]);
        }

        if self.adjacency[from][relation.index()].contains(&to) {
            return false;
        }
        self.adjacency[from][relation.index()].push(to);
        self.adjacency[to][relation.opposite().index()].push(from);
        self.n_edges += 2;
        true
    }

    /// Every node reachable from `node` by one edge labelled `relation`.
    ///
    /// Unknown nodes and missing edges give an empty slice.
    pub fn neighbors(&self, node: NodeId, relation: Direction) -> &[NodeId] {
        self.adjacency
            .get(node)
            .map(|lists| lists[relation.index()].as_slice())
            .unwrap_or(&[])
    }

    /// `neighbors` with the relation given by name.
    pub fn neighbors_named(&self, node: NodeId, relation: &str) -> Result<&[NodeId], EventError> {
        let relation: Direction = relation.parse()?;
        Ok(self.neighbors(node, relation))
    }

    /// Nodes lying on the `side` of `node` in transcript order.
    ///
    /// A node is upstream of `node` exactly when `node` is downstream of it,
    /// hence the flipped label.
    #[inline]
    pub fn toward(&self, node: NodeId, side: Direction) -> &[NodeId] {
        self.neighbors(node, side.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples() -> Vec<Triple> {
        vec![
            Triple::new("A", Direction::Upstream, "jAB"),
            Triple::new("B", Direction::Downstream, "jAB"),
            Triple::new("B", Direction::Upstream, "jBC"),
            Triple::new("C", Direction::Downstream, "jBC"),
        ]
    }

    fn build(triples: &[Triple]) -> (NodeIndex, AdjacencyGraph) {
        let index = NodeIndex::from_triples(triples).unwrap();
        let mut graph = AdjacencyGraph::with_nodes(index.len());
        for t in triples {
            let e = index.id(&t.exon).unwrap();
            let j = index.id(&t.junction).unwrap();
            graph.insert(e, t.direction, j);
        }
        (index, graph)
    }

    #[test]
    fn exons_come_first_in_first_seen_order() {
        let index = NodeIndex::from_triples(&triples()).unwrap();
        assert_eq!(index.names(), &["A", "B", "C", "jAB", "jBC"]);
        assert_eq!(index.exon_ids(), 0..3);
        assert_eq!(index.junction_ids(), 3..5);
        assert!(index.is_exon(2));
        assert!(!index.is_exon(3));
    }

    #[test]
    fn role_conflict_is_rejected() {
        let bad = vec![
            Triple::new("A", Direction::Upstream, "jAB"),
            Triple::new("jAB", Direction::Downstream, "A"),
        ];
        assert!(matches!(
            NodeIndex::from_triples(&bad),
            Err(EventError::InvalidTriple { .. })
        ));
    }

    #[test]
    fn every_edge_has_its_inverse() {
        let triples = triples();
        let (index, graph) = build(&triples);

        for t in &triples {
            let e = index.id(&t.exon).unwrap();
            let j = index.id(&t.junction).unwrap();
            assert!(graph.neighbors(e, t.direction).contains(&j));
            assert!(graph.neighbors(j, t.direction.opposite()).contains(&e));
        }
        assert_eq!(graph.edge_count(), 2 * triples.len());
    }

    #[test]
    fn insertion_is_idempotent() {
        let mut twice = triples();
        twice.extend(triples());
        let (index_once, graph_once) = build(&triples());
        let (index_twice, graph_twice) = build(&twice);

        assert_eq!(index_once.len(), index_twice.len());
        assert_eq!(graph_once.edge_count(), graph_twice.edge_count());
        for node in 0..index_once.len() {
            for d in Direction::ALL {
                assert_eq!(graph_once.neighbors(node, d), graph_twice.neighbors(node, d));
            }
        }
    }

    #[test]
    fn toward_reads_transcript_order() {
        let (index, graph) = build(&triples());
        let b = index.id("B").unwrap();
        let j_ab = index.id("jAB").unwrap();
        let j_bc = index.id("jBC").unwrap();

        assert_eq!(graph.toward(b, Direction::Upstream), &[j_ab]);
        assert_eq!(graph.toward(b, Direction::Downstream), &[j_bc]);
        assert_eq!(graph.toward(j_ab, Direction::Upstream), &[index.id("A").unwrap()]);
    }

    #[test]
    fn missing_edges_and_nodes_are_empty() {
        let (index, graph) = build(&triples());
        let a = index.id("A").unwrap();
        assert!(graph.toward(a, Direction::Upstream).is_empty());
        assert!(graph.neighbors(999, Direction::Upstream).is_empty());
    }

    #[test]
    fn unknown_relation_name_fails() {
        let (_, graph) = build(&triples());
        assert_eq!(
            graph.neighbors_named(0, "sideways"),
            Err(EventError::UnknownDirection("sideways".to_string()))
        );
        assert_eq!(graph.neighbors_named(0, "upstream").unwrap().len(), 1);
    }
}
