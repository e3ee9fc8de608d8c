use pegbank_core::LedgerResult;

use crate::gas::{Gas, GasMeter};
use crate::store::AccountStore;

/// Execution context for one top-level operation.
///
/// Carries the account store view the operation reads and writes, and the
/// gas meter it spends against. Every write made through the context lands
/// in `store` immediately; for revertible execution pass a
/// [`BranchStore`](crate::branch::BranchStore) as the store.
pub struct Context<'a> {
    store: &'a dyn AccountStore,
    gas_meter: &'a mut dyn GasMeter,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a dyn AccountStore, gas_meter: &'a mut dyn GasMeter) -> Self {
        Self { store, gas_meter }
    }

    pub fn store(&self) -> &'a dyn AccountStore {
        self.store
    }

    pub fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> LedgerResult<()> {
        self.gas_meter.consume_gas(amount, descriptor)?;
        Ok(())
    }

    pub fn gas_consumed(&self) -> Gas {
        self.gas_meter.gas_consumed()
    }
}

impl core::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("gas_consumed", &self.gas_meter.gas_consumed())
            .field("gas_limit", &self.gas_meter.limit())
            .finish_non_exhaustive()
    }
}
