//! Canonical location strings.
//!
//! Every exon and junction is keyed by one string:
//! `chrom:start-stop:strand`, optionally prefixed by its region kind
//! (`exon:chr1:150-175:+`). Two intervals are the same entity iff the
//! strings are equal, so decoding insists on the canonical spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::types::{RegionKind, Span, Strand};

/// Encode an interval as its canonical location string.
///
/// ```
/// use splice_events::{encode, RegionKind, Strand};
///
/// assert_eq!(encode("chr1", 100, 200, Strand::Plus, None).unwrap(), "chr1:100-200:+");
/// assert_eq!(
///     encode("chr1", 100, 200, Strand::Minus, Some(RegionKind::Exon)).unwrap(),
///     "exon:chr1:100-200:-"
/// );
/// ```
pub fn encode(
    chrom: &str,
    start: u32,
    stop: u32,
    strand: Strand,
    region: Option<RegionKind>,
) -> Result<String, EventError> {
    Location::new(chrom, start, stop, strand, region).map(|loc| loc.to_string())
}

/// Decoded form of a location string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub region: Option<RegionKind>,
    pub chrom: String,
    pub span: Span,
    pub strand: Strand,
}

impl Location {
    pub fn new(
        chrom: impl Into<String>,
        start: u32,
        stop: u32,
        strand: Strand,
        region: Option<RegionKind>,
    ) -> Result<Self, EventError> {
        let chrom = chrom.into();
        let span = Span::new(start, stop)?;
        if chrom.is_empty() {
            return Err(EventError::malformed(&chrom, "empty chromosome name"));
        }
        Ok(Self {
            region,
            chrom,
            span,
            strand,
        })
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn stop(&self) -> u32 {
        self.span.stop
    }

    /// Same chromosome and strand.
    pub fn same_locus(&self, other: &Location) -> bool {
        self.chrom == other.chrom && self.strand == other.strand
    }

    /// Decode a location string; fails on anything that would not
    /// re-encode to exactly the same string.
    pub fn decode(s: &str) -> Result<Self, EventError> {
        let (rest, strand_s) = s
            .rsplit_once(':')
            .ok_or_else(|| EventError::malformed(s, "missing ':strand' suffix"))?;
        let strand: Strand = strand_s
            .parse()
            .map_err(|_| EventError::malformed(s, format!("bad strand '{strand_s}'")))?;

        let (head, range) = rest
            .rsplit_once(':')
            .ok_or_else(|| EventError::malformed(s, "missing 'chrom:' prefix"))?;
        let (start_s, stop_s) = range
            .split_once('-')
            .ok_or_else(|| EventError::malformed(s, format!("bad range '{range}'")))?;
        let start = parse_coordinate(s, start_s)?;
        let stop = parse_coordinate(s, stop_s)?;

        let (region, chrom) = match head.split_once(':') {
            Some((prefix, chrom)) => match RegionKind::from_prefix(prefix) {
                Some(kind) => (Some(kind), chrom),
                None => (None, head),
            },
            None => (None, head),
        };

        let loc = Location::new(chrom, start, stop, strand, region)?;
        if loc.to_string() != s {
            return Err(EventError::malformed(s, "not in canonical form"));
        }
        Ok(loc)
    }
}

fn parse_coordinate(location: &str, digits: &str) -> Result<u32, EventError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EventError::malformed(
            location,
            format!("coordinate '{digits}' is not a non-negative integer"),
        ));
    }
    digits
        .parse()
        .map_err(|_| EventError::malformed(location, format!("coordinate '{digits}' out of range")))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(region) = self.region {
            write!(f, "{region}:")?;
        }
        write!(
            f,
            "{}:{}-{}:{}",
            self.chrom, self.span.start, self.span.stop, self.strand
        )
    }
}

impl FromStr for Location {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::decode(s)
    }
}
