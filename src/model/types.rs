use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::types::Strand;

/// Internal numeric IDs (indexes into Vecs).
pub type NodeId = usize;

/// Alternative-splicing event classes, one detection algorithm each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventClass {
    /// Middle exon skipped by a direct junction between its neighbours.
    SkippedExon,

    /// Two non-overlapping, never co-spliced exons between the same flanks.
    MutuallyExclusiveExons,

    /// Two exon variants differing only at their 3' end (the donor site).
    Alt5PrimeSpliceSite,

    /// Two exon variants differing only at their 5' end (the acceptor site).
    Alt3PrimeSpliceSite,

    /// Two transcript-initial exons feeding the same downstream exon.
    AltFirstExon,

    /// Two transcript-final exons fed by the same upstream exon.
    AltLastExon,
}

impl EventClass {
    pub const ALL: [EventClass; 6] = [
        EventClass::SkippedExon,
        EventClass::MutuallyExclusiveExons,
        EventClass::Alt5PrimeSpliceSite,
        EventClass::Alt3PrimeSpliceSite,
        EventClass::AltFirstExon,
        EventClass::AltLastExon,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            EventClass::SkippedExon => "se",
            EventClass::MutuallyExclusiveExons => "mxe",
            EventClass::Alt5PrimeSpliceSite => "a5ss",
            EventClass::Alt3PrimeSpliceSite => "a3ss",
            EventClass::AltFirstExon => "afe",
            EventClass::AltLastExon => "ale",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            EventClass::SkippedExon => "skipped_exon",
            EventClass::MutuallyExclusiveExons => "mutually_exclusive_exon",
            EventClass::Alt5PrimeSpliceSite => "alt_5prime_splice_site",
            EventClass::Alt3PrimeSpliceSite => "alt_3prime_splice_site",
            EventClass::AltFirstExon => "alt_first_exon",
            EventClass::AltLastExon => "alt_last_exon",
        }
    }

    /// Output columns holding exon locations, in record order.
    pub fn exon_columns(self) -> &'static [&'static str] {
        match self {
            EventClass::MutuallyExclusiveExons => &["exon1", "exon2", "exon3", "exon4"],
            _ => &["exon1", "exon2", "exon3"],
        }
    }

    /// Output columns holding junction locations, in record order.
    pub fn junction_columns(self) -> &'static [&'static str] {
        match self {
            EventClass::SkippedExon => &["junction12", "junction23", "junction13"],
            EventClass::MutuallyExclusiveExons => {
                &["junction12", "junction13", "junction24", "junction34"]
            }
            // shared exon is exon3
            EventClass::Alt5PrimeSpliceSite | EventClass::AltFirstExon => {
                &["junction13", "junction23"]
            }
            // shared exon is exon1
            EventClass::Alt3PrimeSpliceSite | EventClass::AltLastExon => {
                &["junction12", "junction13"]
            }
        }
    }

    /// Full header: exon columns, junction columns, strand.
    pub fn columns(self) -> Vec<&'static str> {
        let mut cols = Vec::with_capacity(8);
        cols.extend_from_slice(self.exon_columns());
        cols.extend_from_slice(self.junction_columns());
        cols.push("strand");
        cols
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for EventClass {
    type Err = EventError;

    /// Accepts the abbreviation or the long name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EventClass::ALL
            .into_iter()
            .find(|c| c.abbrev() == wanted || c.long_name() == wanted)
            .ok_or_else(|| EventError::UnknownEventClass(s.to_string()))
    }
}

/// One detected event: exon and junction locations in column order.
///
/// Built once by a detection pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventRecord {
    pub exons: Vec<String>,
    pub junctions: Vec<String>,
    pub strand: Strand,
}

impl EventRecord {
    /// Row values in header order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.exons
            .iter()
            .chain(self.junctions.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.strand.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_class_names_parse() {
        assert_eq!("SE".parse::<EventClass>().unwrap(), EventClass::SkippedExon);
        assert_eq!(
            "mutually_exclusive_exon".parse::<EventClass>().unwrap(),
            EventClass::MutuallyExclusiveExons
        );
        for class in EventClass::ALL {
            assert_eq!(class.abbrev().parse::<EventClass>().unwrap(), class);
            assert_eq!(class.long_name().parse::<EventClass>().unwrap(), class);
        }
    }

    #[test]
    fn unknown_event_class_fails() {
        assert_eq!(
            "retained_intron".parse::<EventClass>(),
            Err(EventError::UnknownEventClass("retained_intron".to_string()))
        );
    }

    #[test]
    fn columns_match_record_arity() {
        assert_eq!(
            EventClass::SkippedExon.columns(),
            vec!["exon1", "exon2", "exon3", "junction12", "junction23", "junction13", "strand"]
        );
        assert_eq!(EventClass::MutuallyExclusiveExons.columns().len(), 9);
        assert_eq!(EventClass::AltFirstExon.columns().len(), 6);
    }

    #[test]
    fn record_fields_follow_header_order() {
        let rec = EventRecord {
            exons: vec!["a".into(), "b".into(), "c".into()],
            junctions: vec!["ab".into(), "bc".into(), "ac".into()],
            strand: Strand::Minus,
        };
        let fields: Vec<&str> = rec.fields().collect();
        assert_eq!(fields, vec!["a", "b", "c", "ab", "bc", "ac", "-"]);
    }
}
