//! `pegbank-core` — ledger primitives shared by every pegbank crate.
//!
//! Pure value types only: addresses, coin arithmetic and the error model.
//! No storage, no metering, no logging.

pub mod address;
pub mod coins;
pub mod error;

pub use address::{AccountAddress, PegHash};
pub use coins::{Coin, Coins};
pub use error::{LedgerError, LedgerResult};
