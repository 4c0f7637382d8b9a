//! The input contract: a deduplicated (exon, direction, junction) table.

pub mod builder;
pub mod io;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::model::chain::ExonChain;
use crate::types::Direction;

pub use builder::{TripleColumns, TripleTableBuilder};
pub use io::{ParseError, TripleReader};

/// `exon` is the `direction` neighbour of `junction` in at least one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub exon: String,
    pub direction: Direction,
    pub junction: String,
}

impl Triple {
    pub fn new(exon: impl Into<String>, direction: Direction, junction: impl Into<String>) -> Self {
        Self {
            exon: exon.into(),
            direction,
            junction: junction.into(),
        }
    }
}

/// Ordered, duplicate-free list of triples.
///
/// Insertion order is kept; it only matters for reproducible node ids.
#[derive(Debug, Clone, Default)]
pub struct TripleTable {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
}

impl TripleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triples of every chain, deduplicated across chains.
    pub fn from_chains<'a, I>(chains: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = &'a ExonChain>,
    {
        let mut table = Self::new();
        for chain in chains {
            table.extend(chain.triples()?);
        }
        Ok(table)
    }

    /// Returns false if the triple was already present.
    pub fn push(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }
}

impl Extend<Triple> for TripleTable {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.push(triple);
        }
    }
}

impl FromIterator<Triple> for TripleTable {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a> IntoIterator for &'a TripleTable {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
