//! Ledger error model.

use thiserror::Error;

use crate::address::AccountAddress;
use crate::coins::Coins;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// A closed set of structured failures. Fields carry the values involved so
/// callers can inspect them; text is produced only by `Display`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A debit (or credit) would leave some denomination negative.
    #[error("insufficient funds: {have} < {want}")]
    InsufficientFunds { have: Coins, want: Coins },

    /// The issuer has no asset peg left to issue.
    #[error("no assets left in pool of issuer {issuer}")]
    PoolExhausted { issuer: AccountAddress },

    /// The cost meter ran past its limit.
    #[error("out of gas in {descriptor}: limit {limit}, consumed {consumed}")]
    OutOfGas {
        descriptor: String,
        limit: u64,
        consumed: u64,
    },

    /// Integer arithmetic on a denomination overflowed.
    #[error("amount overflow in denomination '{denom}'")]
    AmountOverflow { denom: String },

    /// The account store rejected a write.
    #[error("account store failure: {0}")]
    Store(String),

    /// A coin amount or denomination was malformed.
    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    /// An address was malformed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// An asset peg identifier was malformed.
    #[error("invalid peg hash: {0}")]
    InvalidPegHash(String),

    /// A multi-input/multi-output transfer has no inputs or no outputs.
    #[error("transfer must have at least one input and one output")]
    EmptyTransfer,

    /// Inputs and outputs of a transfer do not sum to the same coins.
    #[error("inputs ({inputs}) and outputs ({outputs}) are not balanced")]
    UnbalancedTransfer { inputs: Coins, outputs: Coins },
}

impl LedgerError {
    pub fn insufficient_funds(have: Coins, want: Coins) -> Self {
        Self::InsufficientFunds { have, want }
    }

    pub fn pool_exhausted(issuer: AccountAddress) -> Self {
        Self::PoolExhausted { issuer }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn invalid_coins(msg: impl Into<String>) -> Self {
        Self::InvalidCoins(msg.into())
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }

    pub fn invalid_peg_hash(msg: impl Into<String>) -> Self {
        Self::InvalidPegHash(msg.into())
    }
}
