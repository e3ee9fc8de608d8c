//! Observable effects of ledger operations.
//!
//! Ledger calls return [`Tags`]; shipping them anywhere is the caller's job,
//! typically through a [`TagSink`].

pub mod sink;
pub mod tag;

pub use sink::{InMemoryTagSink, SinkError, TagSink};
pub use tag::{Tag, Tags};
