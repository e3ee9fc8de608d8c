//! Balance accounting core.
//!
//! Fungible coin balances and non-fungible asset pegs held in an
//! [`AccountStore`], manipulated through three keeper tiers:
//!
//! - [`Keeper`] (`Bank`): everything, including mint/burn and issuance
//! - [`SendKeeper`] (`SendBank`): reads and transfers
//! - [`ViewKeeper`] (`ViewBank`): reads
//!
//! Every call runs inside a [`Context`] that supplies the store and a gas
//! meter. Writes are committed step by step; callers needing atomicity run
//! the operation against a [`BranchStore`] and commit it on success.

pub mod account;
pub mod branch;
pub mod config;
pub mod context;
pub mod gas;
pub mod keeper;
pub mod msgs;
pub mod store;

mod issuance;
mod mapper;

pub use account::{Account, AssetPeg, AssetPegWallet};
pub use branch::BranchStore;
pub use config::GasSchedule;
pub use context::Context;
pub use gas::{BasicGasMeter, Gas, GasMeter, InfiniteGasMeter, OutOfGas};
pub use keeper::{Bank, Keeper, SendBank, SendKeeper, ViewBank, ViewKeeper};
pub use msgs::{Input, IssueAsset, Output, validate_input_outputs};
pub use store::{AccountStore, InMemoryAccountStore, StoreError};
