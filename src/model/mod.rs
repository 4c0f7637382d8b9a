pub mod chain;
pub mod location;
pub mod types;

pub use chain::ExonChain;
pub use location::{encode, Location};
pub use types::{EventClass, EventRecord, NodeId};
