//! Coin primitives shared by every keeper tier.
//!
//! Each primitive charges its fixed cost first, then reads and writes the
//! context's store directly. Nothing is buffered: a composite operation that
//! fails halfway leaves its earlier steps committed.

use pegbank_core::{AccountAddress, Coins, LedgerError, LedgerResult};
use pegbank_events::Tags;
use pegbank_events::tag::{RECIPIENT, SENDER};

use crate::config::GasSchedule;
use crate::context::Context;
use crate::msgs::{Input, Output};

/// The single dependency all keeper tiers wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AccountMapper {
    gas: GasSchedule,
}

impl AccountMapper {
    pub(crate) fn new(gas: GasSchedule) -> Self {
        Self { gas }
    }

    pub(crate) fn gas_schedule(&self) -> &GasSchedule {
        &self.gas
    }

    pub(crate) fn get_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
    ) -> LedgerResult<Coins> {
        ctx.consume_gas(self.gas.get_coins, "get_coins")?;
        Ok(ctx
            .store()
            .get(address)
            .map(|acc| acc.into_coins())
            .unwrap_or_default())
    }

    pub(crate) fn set_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: Coins,
    ) -> LedgerResult<()> {
        ctx.consume_gas(self.gas.set_coins, "set_coins")?;
        let store = ctx.store();
        let mut acc = store
            .get(address)
            .unwrap_or_else(|| store.create(*address));
        acc.set_coins(amt);
        store.put(acc)?;
        Ok(())
    }

    pub(crate) fn has_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<bool> {
        ctx.consume_gas(self.gas.has_coins, "has_coins")?;
        Ok(self.get_coins(ctx, address)?.is_gte(amt))
    }

    pub(crate) fn subtract_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)> {
        ctx.consume_gas(self.gas.subtract_coins, "subtract_coins")?;
        let old_coins = self.get_coins(ctx, address)?;
        let new_coins = old_coins.checked_minus(amt)?;
        if !new_coins.is_not_negative() {
            tracing::warn!(%address, have = %old_coins, want = %amt, "debit rejected");
            return Err(LedgerError::insufficient_funds(old_coins, amt.clone()));
        }
        self.set_coins(ctx, address, new_coins.clone())?;
        tracing::debug!(%address, amount = %amt, balance = %new_coins, "coins subtracted");
        Ok((new_coins, Tags::new(SENDER, address.to_string())))
    }

    pub(crate) fn add_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)> {
        ctx.consume_gas(self.gas.add_coins, "add_coins")?;
        let old_coins = self.get_coins(ctx, address)?;
        let new_coins = old_coins.checked_plus(amt)?;
        if !new_coins.is_not_negative() {
            tracing::warn!(%address, have = %old_coins, want = %amt, "credit rejected");
            return Err(LedgerError::insufficient_funds(old_coins, amt.clone()));
        }
        self.set_coins(ctx, address, new_coins.clone())?;
        tracing::debug!(%address, amount = %amt, balance = %new_coins, "coins added");
        Ok((new_coins, Tags::new(RECIPIENT, address.to_string())))
    }

    /// Not atomic: a failed credit leaves the debit committed.
    pub(crate) fn send_coins(
        &self,
        ctx: &mut Context<'_>,
        from: &AccountAddress,
        to: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<Tags> {
        let (_, sub_tags) = self.subtract_coins(ctx, from, amt)?;
        let (_, add_tags) = self.add_coins(ctx, to, amt)?;
        Ok(sub_tags.append_tags(add_tags))
    }

    /// Debits every input, then credits every output, in order.
    ///
    /// Does not check that inputs and outputs balance, and stops at the first
    /// failure with earlier steps committed.
    pub(crate) fn input_output_coins(
        &self,
        ctx: &mut Context<'_>,
        inputs: &[Input],
        outputs: &[Output],
    ) -> LedgerResult<Tags> {
        let mut all_tags = Tags::empty();

        for input in inputs {
            let (_, tags) = self.subtract_coins(ctx, &input.address, &input.coins)?;
            all_tags = all_tags.append_tags(tags);
        }

        for output in outputs {
            let (_, tags) = self.add_coins(ctx, &output.address, &output.coins)?;
            all_tags = all_tags.append_tags(tags);
        }

        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            "multi-party transfer applied"
        );
        Ok(all_tags)
    }
}
