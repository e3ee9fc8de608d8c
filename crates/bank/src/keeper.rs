//! Keeper tiers over the account store.
//!
//! Three façades share one [`AccountMapper`]:
//!
//! - [`Keeper`]: every operation, including unilateral mint/burn and issuance.
//! - [`SendKeeper`]: reads plus transfers; cannot create or destroy value
//!   on its own.
//! - [`ViewKeeper`]: reads only.
//!
//! Capabilities are expressed by the [`ViewBank`] ⊂ [`SendBank`] ⊂ [`Bank`]
//! trait ladder. A tier can be narrowed (`Keeper::as_send_keeper`) but never
//! widened.
//!
//! None of the multi-step operations are atomic. Run them against a
//! [`BranchStore`](crate::branch::BranchStore) when partial effects must be
//! discarded on failure.

use pegbank_core::{AccountAddress, Coins, LedgerResult};
use pegbank_events::Tags;

use crate::account::AssetPeg;
use crate::config::GasSchedule;
use crate::context::Context;
use crate::mapper::AccountMapper;
use crate::msgs::{Input, IssueAsset, Output};

/// Read access to balances.
pub trait ViewBank {
    /// Balance of `address`; the zero balance for unknown accounts.
    fn get_coins(&self, ctx: &mut Context<'_>, address: &AccountAddress) -> LedgerResult<Coins>;

    /// Whether `address` holds at least `amt` in every denomination of `amt`.
    fn has_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<bool>;
}

/// Transfers between existing holders.
pub trait SendBank: ViewBank {
    /// Move `amt` from `from` to `to`. Tags: `sender`, then `recipient`.
    fn send_coins(
        &self,
        ctx: &mut Context<'_>,
        from: &AccountAddress,
        to: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<Tags>;

    /// Debit all inputs, then credit all outputs. The caller guarantees the
    /// two sides balance (see [`validate_input_outputs`](crate::msgs::validate_input_outputs)).
    fn input_output_coins(
        &self,
        ctx: &mut Context<'_>,
        inputs: &[Input],
        outputs: &[Output],
    ) -> LedgerResult<Tags>;
}

/// Full ledger access.
pub trait Bank: SendBank {
    /// Overwrite the balance. `amt` is stored as given.
    fn set_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: Coins,
    ) -> LedgerResult<()>;

    fn subtract_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)>;

    fn add_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)>;

    /// Issue one peg from `issuer`'s pool to `to`, returning the delivered peg.
    fn issue_asset(
        &self,
        ctx: &mut Context<'_>,
        issuer: &AccountAddress,
        to: &AccountAddress,
        template: AssetPeg,
    ) -> LedgerResult<(AssetPeg, Tags)>;

    fn issue_assets_to_wallets(
        &self,
        ctx: &mut Context<'_>,
        requests: &[IssueAsset],
    ) -> LedgerResult<Tags>;
}

/// Keeper with full access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keeper {
    mapper: AccountMapper,
}

/// Keeper limited to reads and transfers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendKeeper {
    mapper: AccountMapper,
}

/// Keeper limited to reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewKeeper {
    mapper: AccountMapper,
}

macro_rules! impl_keeper_ctor {
    ($t:ty) => {
        impl $t {
            /// Keeper charging the default gas schedule.
            pub fn new() -> Self {
                Self::default()
            }

            pub fn with_gas_schedule(gas: GasSchedule) -> Self {
                Self {
                    mapper: AccountMapper::new(gas),
                }
            }

            pub fn gas_schedule(&self) -> &GasSchedule {
                self.mapper.gas_schedule()
            }

            /// Narrow to read-only access.
            pub fn as_view_keeper(&self) -> ViewKeeper {
                ViewKeeper {
                    mapper: self.mapper,
                }
            }
        }

        impl ViewBank for $t {
            fn get_coins(
                &self,
                ctx: &mut Context<'_>,
                address: &AccountAddress,
            ) -> LedgerResult<Coins> {
                self.mapper.get_coins(ctx, address)
            }

            fn has_coins(
                &self,
                ctx: &mut Context<'_>,
                address: &AccountAddress,
                amt: &Coins,
            ) -> LedgerResult<bool> {
                self.mapper.has_coins(ctx, address, amt)
            }
        }
    };
}

macro_rules! impl_send_bank {
    ($t:ty) => {
        impl SendBank for $t {
            fn send_coins(
                &self,
                ctx: &mut Context<'_>,
                from: &AccountAddress,
                to: &AccountAddress,
                amt: &Coins,
            ) -> LedgerResult<Tags> {
                self.mapper.send_coins(ctx, from, to, amt)
            }

            fn input_output_coins(
                &self,
                ctx: &mut Context<'_>,
                inputs: &[Input],
                outputs: &[Output],
            ) -> LedgerResult<Tags> {
                self.mapper.input_output_coins(ctx, inputs, outputs)
            }
        }
    };
}

impl_keeper_ctor!(Keeper);
impl_keeper_ctor!(SendKeeper);
impl_keeper_ctor!(ViewKeeper);

impl_send_bank!(Keeper);
impl_send_bank!(SendKeeper);

impl Keeper {
    /// Narrow to transfer-only access.
    pub fn as_send_keeper(&self) -> SendKeeper {
        SendKeeper {
            mapper: self.mapper,
        }
    }
}

impl Bank for Keeper {
    fn set_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: Coins,
    ) -> LedgerResult<()> {
        self.mapper.set_coins(ctx, address, amt)
    }

    fn subtract_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)> {
        self.mapper.subtract_coins(ctx, address, amt)
    }

    fn add_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &AccountAddress,
        amt: &Coins,
    ) -> LedgerResult<(Coins, Tags)> {
        self.mapper.add_coins(ctx, address, amt)
    }

    fn issue_asset(
        &self,
        ctx: &mut Context<'_>,
        issuer: &AccountAddress,
        to: &AccountAddress,
        template: AssetPeg,
    ) -> LedgerResult<(AssetPeg, Tags)> {
        self.mapper.issue_asset(ctx, issuer, to, template)
    }

    fn issue_assets_to_wallets(
        &self,
        ctx: &mut Context<'_>,
        requests: &[IssueAsset],
    ) -> LedgerResult<Tags> {
        self.mapper.issue_assets_to_wallets(ctx, requests)
    }
}
