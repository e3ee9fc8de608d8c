//! Process-wide logging setup for hosts embedding the ledger.

/// Tracing subscriber configuration and installation.
pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat, init, init_with};
