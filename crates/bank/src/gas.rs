//! Cost metering.
//!
//! Ledger operations spend a fixed amount of gas against the meter carried by
//! their [`Context`](crate::context::Context). The meter decides when the
//! budget is gone; the ledger only propagates the failure.

use thiserror::Error;

use pegbank_core::LedgerError;

/// Abstract cost unit.
pub type Gas = u64;

/// The meter's limit was exceeded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("out of gas in {descriptor}: limit {limit}, consumed {consumed}")]
pub struct OutOfGas {
    pub descriptor: String,
    pub limit: Gas,
    pub consumed: Gas,
}

impl From<OutOfGas> for LedgerError {
    fn from(value: OutOfGas) -> Self {
        LedgerError::OutOfGas {
            descriptor: value.descriptor,
            limit: value.limit,
            consumed: value.consumed,
        }
    }
}

pub trait GasMeter {
    fn gas_consumed(&self) -> Gas;

    /// `None` for meters without a limit.
    fn limit(&self) -> Option<Gas>;

    /// Record `amount` under `descriptor`.
    ///
    /// Consumption is recorded even when it pushes the meter past its limit,
    /// so `gas_consumed` reports the full demand after a failure.
    fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<(), OutOfGas>;

    fn is_out_of_gas(&self) -> bool {
        self.limit().is_some_and(|limit| self.gas_consumed() > limit)
    }
}

/// Meter with a hard limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicGasMeter {
    limit: Gas,
    consumed: Gas,
}

impl BasicGasMeter {
    pub fn new(limit: Gas) -> Self {
        Self { limit, consumed: 0 }
    }
}

impl GasMeter for BasicGasMeter {
    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    fn limit(&self) -> Option<Gas> {
        Some(self.limit)
    }

    fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<(), OutOfGas> {
        self.consumed = self.consumed.saturating_add(amount);
        if self.consumed > self.limit {
            tracing::warn!(
                descriptor,
                limit = self.limit,
                consumed = self.consumed,
                "gas limit exceeded"
            );
            return Err(OutOfGas {
                descriptor: descriptor.to_string(),
                limit: self.limit,
                consumed: self.consumed,
            });
        }
        Ok(())
    }
}

/// Meter that only counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfiniteGasMeter {
    consumed: Gas,
}

impl InfiniteGasMeter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    fn limit(&self) -> Option<Gas> {
        None
    }

    fn consume_gas(&mut self, amount: Gas, _descriptor: &str) -> Result<(), OutOfGas> {
        self.consumed = self.consumed.saturating_add(amount);
        Ok(())
    }
}
