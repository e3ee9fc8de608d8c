//! Asset peg issuance.
//!
//! An issuer holds a pool of pre-minted pegs. Issuing pops the pool's tail,
//! stamps its identifier onto a caller-supplied template and appends the
//! result to the recipient's wallet.

use pegbank_core::{AccountAddress, LedgerError, LedgerResult};
use pegbank_events::Tags;
use pegbank_events::tag::{ISSUE_RECIPIENT, ISSUER};

use crate::account::{AssetPeg, AssetPegWallet};
use crate::context::Context;
use crate::mapper::AccountMapper;
use crate::msgs::IssueAsset;

impl AccountMapper {
    pub(crate) fn get_asset_wallet(
        &self,
        ctx: &Context<'_>,
        address: &AccountAddress,
    ) -> AssetPegWallet {
        ctx.store()
            .get(address)
            .map(|acc| acc.into_asset_peg_wallet())
            .unwrap_or_default()
    }

    pub(crate) fn set_asset_wallet(
        &self,
        ctx: &Context<'_>,
        address: &AccountAddress,
        wallet: AssetPegWallet,
    ) -> LedgerResult<()> {
        let store = ctx.store();
        let mut acc = store
            .get(address)
            .unwrap_or_else(|| store.create(*address));
        acc.set_asset_peg_wallet(wallet);
        store.put(acc)?;
        Ok(())
    }

    /// Issue one peg from `issuer`'s pool to `to`.
    ///
    /// The issuer's shrunk wallet is written first. If writing the
    /// recipient's wallet then fails, the issuer's original wallet is written
    /// back before the error is returned.
    pub(crate) fn issue_asset(
        &self,
        ctx: &mut Context<'_>,
        issuer: &AccountAddress,
        to: &AccountAddress,
        template: AssetPeg,
    ) -> LedgerResult<(AssetPeg, Tags)> {
        let issuer_old_wallet = self.get_asset_wallet(ctx, issuer);
        let mut issuer_new_wallet = issuer_old_wallet.clone();
        let Some(pooled) = issuer_new_wallet.pop() else {
            tracing::warn!(%issuer, "asset pool exhausted");
            return Err(LedgerError::pool_exhausted(*issuer));
        };

        let issued = AssetPeg {
            peg_hash: pooled.peg_hash,
            ..template
        };

        // Self-issuance must see the pool without the popped peg.
        let mut to_new_wallet = if to == issuer {
            issuer_new_wallet.clone()
        } else {
            self.get_asset_wallet(ctx, to)
        };
        to_new_wallet.push(issued.clone());

        self.set_asset_wallet(ctx, issuer, issuer_new_wallet)?;
        if let Err(err) = self.set_asset_wallet(ctx, to, to_new_wallet) {
            tracing::warn!(%issuer, %to, error = %err, "recipient write failed, restoring issuer wallet");
            if let Err(restore_err) = self.set_asset_wallet(ctx, issuer, issuer_old_wallet) {
                tracing::error!(%issuer, error = %restore_err, "failed to restore issuer wallet");
            }
            return Err(err);
        }

        tracing::info!(%issuer, %to, peg_hash = %issued.peg_hash, "asset peg issued");

        let mut tags = Tags::new(ISSUE_RECIPIENT, to.to_string());
        tags.append_tag(ISSUER, issuer.to_string());
        Ok((issued, tags))
    }

    /// Issue sequentially; stops at the first failure with earlier
    /// issuances committed.
    pub(crate) fn issue_assets_to_wallets(
        &self,
        ctx: &mut Context<'_>,
        requests: &[IssueAsset],
    ) -> LedgerResult<Tags> {
        let mut all_tags = Tags::empty();
        for req in requests {
            let (_, tags) =
                self.issue_asset(ctx, &req.issuer, &req.to, req.asset_peg.clone())?;
            all_tags = all_tags.append_tags(tags);
        }
        Ok(all_tags)
    }
}
