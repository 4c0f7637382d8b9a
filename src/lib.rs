//! splice_events
//!
//! Detection of alternative-splicing events (SE, MXE, A5SS, A3SS, AFE, ALE)
//! from a table of (exon, direction, junction) triples.
//! Exons and junctions are keyed by canonical location strings
//! (`exon:chr1:150-175:+`, 1-based closed intervals).

pub mod error;
pub mod events;
pub mod graph;
pub mod model;
pub mod progress;
pub mod triples;
pub mod types;

pub use error::EventError;
pub use events::{EventMaker, EventTable};
pub use graph::{AdjacencyGraph, NodeIndex};

pub use types::{Direction, RegionKind, Span, Strand};

pub use model::chain::ExonChain;
pub use model::location::{encode, Location};
pub use model::types::{EventClass, EventRecord, NodeId};

pub use progress::{CallbackProgress, LogProgress, NoProgress, ProgressReporter, ProgressUpdate};

pub use triples::{ParseError, Triple, TripleTable, TripleTableBuilder};
