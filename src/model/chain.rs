use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::model::location::Location;
use crate::triples::Triple;
use crate::types::{Direction, RegionKind, Span, Strand};

/// Exon chain of one transcript, already extracted from its annotation.
///
/// Exons are kept in genomic order regardless of strand; the strand decides
/// which exon of a pair is upstream of the junction between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonChain {
    pub name: String,
    pub chrom: String,
    pub strand: Strand,
    exons: Vec<Span>,
}

impl ExonChain {
    pub fn new(name: impl Into<String>, chrom: impl Into<String>, strand: Strand) -> Self {
        Self {
            name: name.into(),
            chrom: chrom.into(),
            strand,
            exons: Vec::new(),
        }
    }

    /// Convenience: chain from `(start, stop)` pairs in any order.
    pub fn from_spans(
        name: impl Into<String>,
        chrom: impl Into<String>,
        strand: Strand,
        spans: &[(u32, u32)],
    ) -> Result<Self, EventError> {
        let mut chain = Self::new(name, chrom, strand);
        for &(start, stop) in spans {
            chain.add_exon(start, stop)?;
        }
        Ok(chain)
    }

    pub fn add_exon(&mut self, start: u32, stop: u32) -> Result<(), EventError> {
        let span = Span::new(start, stop)?;
        let pos = self
            .exons
            .binary_search_by_key(&(span.start, span.stop), |s| (s.start, s.stop))
            .unwrap_or_else(|p| p);
        if self.exons.get(pos) != Some(&span) {
            self.exons.insert(pos, span);
        }
        Ok(())
    }

    /// Exons in genomic order.
    pub fn exons(&self) -> &[Span] {
        &self.exons
    }

    /// Introns between consecutive exons, in genomic order.
    ///
    /// Overlapping or touching exons have no intron between them and fail
    /// with `NoIntron`.
    pub fn junctions(&self) -> Result<Vec<Span>, EventError> {
        self.exons
            .windows(2)
            .map(|w| {
                let (up, down) = (w[0], w[1]);
                if u64::from(down.start) <= u64::from(up.stop) + 1 {
                    return Err(EventError::NoIntron {
                        upstream_stop: up.stop,
                        downstream_start: down.start,
                    });
                }
                Span::new(up.stop + 1, down.start - 1)
            })
            .collect()
    }

    /// The (exon, direction, junction) facts contributed by this chain.
    pub fn triples(&self) -> Result<Vec<Triple>, EventError> {
        let junctions = self.junctions()?;
        let mut out = Vec::with_capacity(junctions.len() * 2);

        for (w, junction) in self.exons.windows(2).zip(junctions) {
            let (up, down) = if self.strand.is_reverse() {
                (w[1], w[0])
            } else {
                (w[0], w[1])
            };

            let junction = self.location(junction, RegionKind::Junction)?;
            out.push(Triple::new(
                self.location(up, RegionKind::Exon)?,
                Direction::Upstream,
                junction.clone(),
            ));
            out.push(Triple::new(
                self.location(down, RegionKind::Exon)?,
                Direction::Downstream,
                junction,
            ));
        }

        Ok(out)
    }

    fn location(&self, span: Span, region: RegionKind) -> Result<String, EventError> {
        Location::new(self.chrom.as_str(), span.start, span.stop, self.strand, Some(region))
            .map(|loc| loc.to_string())
    }
}
