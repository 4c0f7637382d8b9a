//! Event detection over the exon/junction adjacency graph.
//!
//! `EventMaker` owns the triple table, the node index and the graph for
//! its whole lifetime. Every detection pass borrows it immutably, so passes
//! may run in any order or concurrently from an outer caller.

mod exclusive;
mod skipped;
mod splice_site;
mod table;
mod terminal;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::{debug, info};

use crate::error::EventError;
use crate::graph::{AdjacencyGraph, NodeIndex};
use crate::model::chain::ExonChain;
use crate::model::location::Location;
use crate::model::types::{EventClass, EventRecord, NodeId};
use crate::progress::{NoProgress, ProgressReporter, Ticker};
use crate::triples::{Triple, TripleTable};
use crate::types::{Direction, RegionKind, Span, Strand};

pub use table::EventTable;

const DEFAULT_PROGRESS_STEP: usize = 10;

/// Builds the adjacency graph once and hosts one detector per event class.
///
/// # Example
/// ```
/// use splice_events::{EventClass, EventMaker, ExonChain, Strand, TripleTable};
///
/// let inclusion = [(100, 150), (200, 250), (300, 350)];
/// let chains = [
///     ExonChain::from_spans("inclusion", "chr1", Strand::Plus, &inclusion)?,
///     ExonChain::from_spans("skipping", "chr1", Strand::Plus, &[(100, 150), (300, 350)])?,
/// ];
/// let maker = EventMaker::new(TripleTable::from_chains(&chains)?)?;
///
/// let se = maker.find(EventClass::SkippedExon);
/// assert_eq!(se.len(), 1);
/// assert_eq!(se.records[0].exons[1], "exon:chr1:200-250:+");
/// # Ok::<(), splice_events::EventError>(())
/// ```
pub struct EventMaker {
    triples: TripleTable,
    index: NodeIndex,
    graph: AdjacencyGraph,
    // decoded once, indexed by NodeId
    locations: Vec<Location>,
    reporter: Box<dyn ProgressReporter>,
    progress_step: usize,
}

impl EventMaker {
    /// Validate every triple and build the node index and graph.
    ///
    /// Fails with `InvalidTriple` for self-referential triples, location
    /// strings that are not canonical, region prefixes that contradict the
    /// column (`junction:` in the exon column and vice versa), exon and
    /// junction on different chromosomes or strands, and a junction that has
    /// the same exon on both of its sides.
    pub fn new(triples: TripleTable) -> Result<Self, EventError> {
        for t in &triples {
            validate_triple(t)?;
        }

        let index = NodeIndex::from_triples(&triples)?;

        let locations = index
            .names()
            .iter()
            .map(|name| Location::decode(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut graph = AdjacencyGraph::with_nodes(index.len());
        for t in &triples {
            let (Some(exon), Some(junction)) = (index.id(&t.exon), index.id(&t.junction)) else {
                continue;
            };
            if graph.neighbors(exon, t.direction.opposite()).contains(&junction) {
                return Err(EventError::invalid_triple(
                    &t.exon,
                    &t.junction,
                    "exon lies both upstream and downstream of the junction",
                ));
            }
            graph.insert(exon, t.direction, junction);
        }

        debug!(
            "Built adjacency graph: {} exons, {} junctions, {} edges from {} triples",
            index.n_exons(),
            index.n_junctions(),
            graph.edge_count(),
            triples.len()
        );

        Ok(Self {
            triples,
            index,
            graph,
            locations,
            reporter: Box::new(NoProgress),
            progress_step: DEFAULT_PROGRESS_STEP,
        })
    }

    /// Convenience: triples of the given exon chains, then `new`.
    pub fn from_chains<'a, I>(chains: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = &'a ExonChain>,
    {
        Self::new(TripleTable::from_chains(chains)?)
    }

    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Percent of anchors between two progress reports (clamped to 1..=100).
    pub fn with_progress_step(mut self, percent: usize) -> Self {
        self.progress_step = percent.clamp(1, 100);
        self
    }

    pub fn triples(&self) -> &TripleTable {
        &self.triples
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Unique exon locations, in order of first appearance.
    pub fn exons(&self) -> &[String] {
        &self.index.names()[self.index.exon_ids()]
    }

    /// Unique junction locations, in order of first appearance.
    pub fn junctions(&self) -> &[String] {
        &self.index.names()[self.index.junction_ids()]
    }

    pub fn location(&self, id: NodeId) -> &Location {
        &self.locations[id]
    }

    /// Run the detector of one event class.
    pub fn find(&self, class: EventClass) -> EventTable {
        let table = match class {
            EventClass::SkippedExon => self.skipped_exon(),
            EventClass::MutuallyExclusiveExons => self.mutually_exclusive_exon(),
            EventClass::Alt5PrimeSpliceSite => self.alt_5prime_splice_site(),
            EventClass::Alt3PrimeSpliceSite => self.alt_3prime_splice_site(),
            EventClass::AltFirstExon => self.alt_first_exon(),
            EventClass::AltLastExon => self.alt_last_exon(),
        };
        info!("Found {} {} events", table.len(), class.long_name());
        table
    }

    /// `find` by abbreviation (`se`) or long name (`skipped_exon`).
    pub fn find_by_name(&self, name: &str) -> Result<EventTable, EventError> {
        let class: EventClass = name.parse()?;
        Ok(self.find(class))
    }

    /// Every event class, in `EventClass::ALL` order.
    pub fn find_all(&self) -> Vec<EventTable> {
        EventClass::ALL.into_iter().map(|c| self.find(c)).collect()
    }

    // -----------------------
    // Shared traversal helpers
    // -----------------------

    #[inline]
    pub(crate) fn span(&self, id: NodeId) -> Span {
        self.locations[id].span
    }

    #[inline]
    pub(crate) fn strand(&self, id: NodeId) -> Strand {
        self.locations[id].strand
    }

    /// `(junction, exon)` pairs one junction away on the `side` of `exon`.
    pub(crate) fn adjacent_exons(&self, exon: NodeId, side: Direction) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for &junction in self.graph.toward(exon, side) {
            for &other in self.graph.toward(junction, side) {
                if other != exon {
                    out.push((junction, other));
                }
            }
        }
        out
    }

    /// `adjacent_exons`, keeping only exons whose coordinates really lie on
    /// that side of the anchor.
    pub(crate) fn flanking(&self, anchor: NodeId, side: Direction) -> Vec<(NodeId, NodeId)> {
        let strand = self.strand(anchor);
        let span = self.span(anchor);
        self.adjacent_exons(anchor, side)
            .into_iter()
            .filter(|&(_, exon)| strand.lies_on(side, self.span(exon), span))
            .collect()
    }

    /// Junctions leading directly from `up` to `down`.
    pub(crate) fn linking_junctions(&self, up: NodeId, down: NodeId) -> Vec<NodeId> {
        let into_down = self.graph.toward(down, Direction::Upstream);
        self.graph
            .toward(up, Direction::Downstream)
            .iter()
            .copied()
            .filter(|j| into_down.contains(j))
            .collect()
    }

    /// Whether a junction joins the two exons in either direction.
    pub(crate) fn connected(&self, a: NodeId, b: NodeId) -> bool {
        !self.linking_junctions(a, b).is_empty() || !self.linking_junctions(b, a).is_empty()
    }

    /// Put two `(junction, exon)` pairs in transcript order of their exons.
    pub(crate) fn in_transcript_order(
        &self,
        strand: Strand,
        a: (NodeId, NodeId),
        b: (NodeId, NodeId),
    ) -> ((NodeId, NodeId), (NodeId, NodeId)) {
        match strand.transcript_cmp(self.span(a.1), self.span(b.1)) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        }
    }

    /// Visit every exon as an anchor, collecting deduplicated records.
    pub(crate) fn scan<F>(&self, class: EventClass, mut detect: F) -> EventTable
    where
        F: FnMut(NodeId, &mut Collector<'_>),
    {
        let anchors = self.index.exon_ids();
        let mut ticker = Ticker::start(
            &*self.reporter,
            class.long_name(),
            anchors.len(),
            self.progress_step,
        );
        let mut out = Collector::new(&self.index, class);

        for (i, anchor) in anchors.enumerate() {
            detect(anchor, &mut out);
            ticker.tick(i + 1);
        }
        ticker.finish();

        out.into_table()
    }
}

/// Accumulates records of one class, dropping repeats of the same
/// exon/junction tuple and resolving ids to location strings.
pub(crate) struct Collector<'a> {
    index: &'a NodeIndex,
    class: EventClass,
    seen: HashSet<Vec<NodeId>>,
    records: Vec<EventRecord>,
}

impl<'a> Collector<'a> {
    fn new(index: &'a NodeIndex, class: EventClass) -> Self {
        Self {
            index,
            class,
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, exons: &[NodeId], junctions: &[NodeId], strand: Strand) {
        debug_assert_eq!(exons.len(), self.class.exon_columns().len());
        debug_assert_eq!(junctions.len(), self.class.junction_columns().len());

        let key: Vec<NodeId> = exons.iter().chain(junctions).copied().collect();
        if !self.seen.insert(key) {
            return;
        }

        let index = self.index;
        let names = |ids: &[NodeId]| -> Vec<String> {
            ids.iter().map(|&id| index.name(id).to_string()).collect()
        };
        let record = EventRecord {
            exons: names(exons),
            junctions: names(junctions),
            strand,
        };
        self.records.push(record);
    }

    fn into_table(self) -> EventTable {
        EventTable {
            class: self.class,
            records: self.records,
        }
    }
}

fn validate_triple(t: &Triple) -> Result<(), EventError> {
    if t.exon == t.junction {
        return Err(EventError::invalid_triple(
            &t.exon,
            &t.junction,
            "exon and junction are the same location",
        ));
    }

    let decode = |s: &str| {
        Location::decode(s)
            .map_err(|e| EventError::invalid_triple(&t.exon, &t.junction, e.to_string()))
    };
    let exon = decode(&t.exon)?;
    let junction = decode(&t.junction)?;

    if matches!(exon.region, Some(RegionKind::Junction)) {
        return Err(EventError::invalid_triple(
            &t.exon,
            &t.junction,
            "junction location in the exon column",
        ));
    }
    if matches!(junction.region, Some(RegionKind::Exon)) {
        return Err(EventError::invalid_triple(
            &t.exon,
            &t.junction,
            "exon location in the junction column",
        ));
    }
    if !exon.same_locus(&junction) {
        return Err(EventError::invalid_triple(
            &t.exon,
            &t.junction,
            "exon and junction lie on different chromosomes or strands",
        ));
    }
    Ok(())
}

/// Human-readable summary of the graph.
///
/// Global counts first, then one line per chromosome and strand with the
/// number of exons and junctions found there.
impl fmt::Display for EventMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "EventMaker: {} triples, {} exons, {} junctions, {} edges",
            self.triples.len(),
            self.index.n_exons(),
            self.index.n_junctions(),
            self.graph.edge_count()
        )?;

        let mut per_locus: BTreeMap<(&str, Strand), (usize, usize)> = BTreeMap::new();
        for (id, loc) in self.locations.iter().enumerate() {
            let counts = per_locus.entry((loc.chrom.as_str(), loc.strand)).or_default();
            if self.index.is_exon(id) {
                counts.0 += 1;
            } else {
                counts.1 += 1;
            }
        }

        for ((chrom, strand), (exons, junctions)) in per_locus {
            writeln!(f, "  - {chrom}:{strand}: exons={exons}, junctions={junctions}")?;
        }
        Ok(())
    }
}
