use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::model::types::{EventClass, EventRecord};

/// Records of one event class, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTable {
    pub class: EventClass,
    pub records: Vec<EventRecord>,
}

impl EventTable {
    pub fn new(class: EventClass) -> Self {
        Self {
            class,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }

    pub fn header(&self) -> Vec<&'static str> {
        self.class.columns()
    }

    /// Same records in lexicographic order; discovery order depends on the
    /// order of the input triples.
    pub fn sorted(mut self) -> Self {
        self.records.sort();
        self
    }

    /// True if a record with exactly these exons (in column order) exists.
    pub fn contains(&self, exons: &[&str]) -> bool {
        self.records
            .iter()
            .any(|r| r.exons.len() == exons.len() && r.exons.iter().zip(exons).all(|(a, b)| a == b))
    }

    /// Header plus one tab-separated row per record.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.header().join("\t"))?;
        for record in &self.records {
            let row: Vec<&str> = record.fields().collect();
            writeln!(out, "{}", row.join("\t"))?;
        }
        out.flush()
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
