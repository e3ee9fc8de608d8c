//! Boundary to the external tag/event pipeline.

use std::sync::Mutex;

use crate::tag::Tags;

#[derive(Debug, PartialEq, Eq)]
pub enum SinkError {
    /// Emit failed due to internal lock poisoning.
    Poisoned,
}

/// Consumer of tag sets produced by ledger operations.
///
/// Implementations forward to whatever log or indexing pipeline the host
/// application runs. The ledger never calls this itself.
pub trait TagSink: Send + Sync {
    fn emit(&self, tags: &Tags) -> Result<(), SinkError>;
}

/// In-memory sink for tests/dev.
///
/// Keeps every emitted tag set in arrival order.
#[derive(Debug, Default)]
pub struct InMemoryTagSink {
    emitted: Mutex<Vec<Tags>>,
}

impl InMemoryTagSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn emitted(&self) -> Vec<Tags> {
        self.emitted
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl TagSink for InMemoryTagSink {
    fn emit(&self, tags: &Tags) -> Result<(), SinkError> {
        let mut emitted = self.emitted.lock().map_err(|_| SinkError::Poisoned)?;
        tracing::trace!(count = tags.len(), "tags emitted");
        emitted.push(tags.clone());
        Ok(())
    }
}
