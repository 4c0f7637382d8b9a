use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Genomic strand/orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn as_str(self) -> &'static str {
        match self {
            Strand::Plus => "+",
            Strand::Minus => "-",
        }
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        self == Strand::Minus
    }

    // ---------------------------------------------------------------
    // Direction convention.
    //
    // Every detection algorithm works on upstream/downstream labels; the
    // only place coordinates meet transcript order is here.
    // ---------------------------------------------------------------

    /// True if `a` lies entirely before `b` in transcript order.
    ///
    /// On `+` that is `a.stop < b.start`; on `-` upstream features carry the
    /// larger coordinates, so it is `a.start > b.stop`.
    #[inline]
    pub fn precedes(self, a: Span, b: Span) -> bool {
        match self {
            Strand::Plus => a.stop < b.start,
            Strand::Minus => a.start > b.stop,
        }
    }

    /// True if `span` lies entirely on the `side` of `of` in transcript order.
    #[inline]
    pub fn lies_on(self, side: Direction, span: Span, of: Span) -> bool {
        match side {
            Direction::Upstream => self.precedes(span, of),
            Direction::Downstream => self.precedes(of, span),
        }
    }

    /// Transcript-order 5' boundary of an interval.
    #[inline]
    pub fn five_prime(self, span: Span) -> u32 {
        match self {
            Strand::Plus => span.start,
            Strand::Minus => span.stop,
        }
    }

    /// Transcript-order 3' boundary of an interval.
    #[inline]
    pub fn three_prime(self, span: Span) -> u32 {
        match self {
            Strand::Plus => span.stop,
            Strand::Minus => span.start,
        }
    }

    /// Orders two intervals as they are met walking the transcript 5' -> 3'.
    pub fn transcript_cmp(self, a: Span, b: Span) -> Ordering {
        match self {
            Strand::Plus => (a.start, a.stop).cmp(&(b.start, b.stop)),
            Strand::Minus => (b.stop, b.start).cmp(&(a.stop, a.start)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strand {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(EventError::malformed(s, "strand must be '+' or '-'")),
        }
    }
}

/// Transcript-order relation between an exon and an adjoining junction.
///
/// A triple `(e, Upstream, j)` reads "e is upstream of j".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Upstream,
    Downstream,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Upstream, Direction::Downstream];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Upstream => Direction::Downstream,
            Direction::Downstream => Direction::Upstream,
        }
    }

    /// `opposite` on a raw label; anything but upstream/downstream fails.
    pub fn opposite_of(label: &str) -> Result<Direction, EventError> {
        label.parse::<Direction>().map(Direction::opposite)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Upstream => "upstream",
            Direction::Downstream => "downstream",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Upstream => 0,
            Direction::Downstream => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upstream" => Ok(Direction::Upstream),
            "downstream" => Ok(Direction::Downstream),
            other => Err(EventError::UnknownDirection(other.to_string())),
        }
    }
}

/// Optional region-kind prefix of a location string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Exon,
    Junction,
}

impl RegionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::Exon => "exon",
            RegionKind::Junction => "junction",
        }
    }

    pub(crate) fn from_prefix(s: &str) -> Option<RegionKind> {
        match s {
            "exon" => Some(RegionKind::Exon),
            "junction" => Some(RegionKind::Junction),
            _ => None,
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed genomic interval `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub stop: u32,
}

impl Span {
    pub fn new(start: u32, stop: u32) -> Result<Self, EventError> {
        if start > stop {
            return Err(EventError::InvalidCoordinate { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Number of bases covered; `u64` so the full `0..=u32::MAX` range fits.
    #[inline]
    pub fn len(self) -> u64 {
        u64::from(self.stop - self.start) + 1
    }

    #[inline]
    pub fn overlaps(self, other: Span) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    #[inline]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }
}
