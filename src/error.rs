use thiserror::Error;

/// Failures raised by the event engine.
///
/// All of them are raised eagerly: location encode/decode, triple table
/// construction and event-class lookup. Detection itself never fails, an
/// anchor without a valid combination simply yields no records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A location with `start > stop`.
    #[error("invalid coordinates: start {start} is greater than stop {stop}")]
    InvalidCoordinate { start: u32, stop: u32 },

    /// Consecutive exons of a chain that overlap or touch, so no intron fits
    /// between them. Carries the exon boundaries as given.
    #[error("no intron between exon end {upstream_stop} and next exon start {downstream_start}")]
    NoIntron {
        upstream_stop: u32,
        downstream_start: u32,
    },

    /// Relation label outside of `upstream`/`downstream`.
    #[error("unknown direction '{0}' (expected 'upstream' or 'downstream')")]
    UnknownDirection(String),

    /// Malformed or self-referential (exon, direction, junction) triple.
    #[error("invalid triple (exon '{exon}', junction '{junction}'): {reason}")]
    InvalidTriple {
        exon: String,
        junction: String,
        reason: String,
    },

    /// Requested event class is not one of se/mxe/a5ss/a3ss/afe/ale.
    #[error("unknown event class '{0}'")]
    UnknownEventClass(String),

    /// String that does not decode as `[region:]chrom:start-stop:strand`.
    #[error("malformed location '{location}': {problem}")]
    MalformedLocation { location: String, problem: String },
}

impl EventError {
    pub(crate) fn invalid_triple(exon: &str, junction: &str, reason: impl Into<String>) -> Self {
        EventError::InvalidTriple {
            exon: exon.to_string(),
            junction: junction.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(location: &str, problem: impl Into<String>) -> Self {
        EventError::MalformedLocation {
            location: location.to_string(),
            problem: problem.into(),
        }
    }
}
