//! Request payloads for multi-party operations, and the stateless checks
//! the invoking layer runs on them before calling a keeper.
//!
//! Keepers never call these checks themselves: an unbalanced
//! `input_output_coins` mints or burns value.

use serde::{Deserialize, Serialize};

use pegbank_core::{AccountAddress, Coins, LedgerError, LedgerResult};

use crate::account::AssetPeg;

/// One debit leg of a multi-party transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub address: AccountAddress,
    pub coins: Coins,
}

/// One credit leg of a multi-party transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: AccountAddress,
    pub coins: Coins,
}

/// Request to issue one asset peg from `issuer`'s pool to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAsset {
    pub issuer: AccountAddress,
    pub to: AccountAddress,
    /// Fields for the issued peg; its `peg_hash` is ignored.
    pub asset_peg: AssetPeg,
}

impl Input {
    pub fn new(address: AccountAddress, coins: Coins) -> Self {
        Self { address, coins }
    }

    pub fn validate_basic(&self) -> LedgerResult<()> {
        validate_leg(&self.address, &self.coins)
    }
}

impl Output {
    pub fn new(address: AccountAddress, coins: Coins) -> Self {
        Self { address, coins }
    }

    pub fn validate_basic(&self) -> LedgerResult<()> {
        validate_leg(&self.address, &self.coins)
    }
}

impl IssueAsset {
    pub fn new(issuer: AccountAddress, to: AccountAddress, asset_peg: AssetPeg) -> Self {
        Self {
            issuer,
            to,
            asset_peg,
        }
    }

    pub fn validate_basic(&self) -> LedgerResult<()> {
        if self.issuer.is_empty() {
            return Err(LedgerError::invalid_address("issuer address is empty"));
        }
        if self.to.is_empty() {
            return Err(LedgerError::invalid_address("recipient address is empty"));
        }
        Ok(())
    }
}

fn validate_leg(address: &AccountAddress, coins: &Coins) -> LedgerResult<()> {
    if address.is_empty() {
        return Err(LedgerError::invalid_address("address is empty"));
    }
    if coins.is_zero() {
        return Err(LedgerError::invalid_coins("amount is zero"));
    }
    if !coins.is_valid() {
        return Err(LedgerError::invalid_coins(coins.to_string()));
    }
    Ok(())
}

/// Check a multi-party transfer before it reaches a keeper.
///
/// Both sides must be non-empty, every leg valid, and the per-denomination
/// totals of inputs and outputs equal.
pub fn validate_input_outputs(inputs: &[Input], outputs: &[Output]) -> LedgerResult<()> {
    if inputs.is_empty() || outputs.is_empty() {
        return Err(LedgerError::EmptyTransfer);
    }

    let mut total_in = Coins::empty();
    for input in inputs {
        input.validate_basic()?;
        total_in = total_in.checked_plus(&input.coins)?;
    }

    let mut total_out = Coins::empty();
    for output in outputs {
        output.validate_basic()?;
        total_out = total_out.checked_plus(&output.coins)?;
    }

    if total_in != total_out {
        return Err(LedgerError::UnbalancedTransfer {
            inputs: total_in,
            outputs: total_out,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> AccountAddress {
        AccountAddress::new([b; 20])
    }

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn balanced_transfer_passes() {
        let inputs = vec![
            Input::new(addr(1), coins("50atom")),
            Input::new(addr(3), coins("30atom,2stake")),
        ];
        let outputs = vec![Output::new(addr(2), coins("80atom,2stake"))];
        validate_input_outputs(&inputs, &outputs).unwrap();
    }

    #[test]
    fn unbalanced_transfer_is_rejected() {
        let inputs = vec![Input::new(addr(1), coins("50atom"))];
        let outputs = vec![Output::new(addr(2), coins("51atom"))];
        let err = validate_input_outputs(&inputs, &outputs).unwrap_err();
        assert_eq!(
            err,
            LedgerError::UnbalancedTransfer {
                inputs: coins("50atom"),
                outputs: coins("51atom"),
            }
        );
    }

    #[test]
    fn empty_sides_are_rejected() {
        let outputs = vec![Output::new(addr(2), coins("1atom"))];
        assert_eq!(
            validate_input_outputs(&[], &outputs),
            Err(LedgerError::EmptyTransfer)
        );
    }

    #[test]
    fn zero_amount_and_empty_address_legs_are_rejected() {
        assert!(matches!(
            Input::new(addr(1), Coins::empty()).validate_basic(),
            Err(LedgerError::InvalidCoins(_))
        ));
        assert!(matches!(
            Output::new(addr(0), coins("1atom")).validate_basic(),
            Err(LedgerError::InvalidAddress(_))
        ));
    }

    #[test]
    fn deserialized_legs_are_canonical() {
        let raw = format!(
            r#"{{"address":"{}","coins":[{{"denom":"stake","amount":1}},{{"denom":"atom","amount":1}}]}}"#,
            addr(1)
        );
        let input: Input = serde_json::from_str(&raw).unwrap();
        assert_eq!(input.coins, coins("1atom,1stake"));
        input.validate_basic().unwrap();
    }

    #[test]
    fn negative_leg_amounts_are_rejected_at_deserialization() {
        let raw = format!(
            r#"{{"address":"{}","coins":[{{"denom":"atom","amount":-100}}]}}"#,
            addr(1)
        );
        assert!(serde_json::from_str::<Input>(&raw).is_err());
        assert!(serde_json::from_str::<Output>(&raw).is_err());
    }

    #[test]
    fn negative_difference_fails_leg_validation() {
        let negative = coins("1atom").checked_minus(&coins("2atom")).unwrap();
        assert!(matches!(
            Input::new(addr(1), negative).validate_basic(),
            Err(LedgerError::InvalidCoins(_))
        ));
    }

    #[test]
    fn issue_request_needs_both_addresses() {
        let req = IssueAsset::new(addr(1), addr(0), AssetPeg::default());
        assert!(req.validate_basic().is_err());
        assert!(IssueAsset::new(addr(1), addr(2), AssetPeg::default())
            .validate_basic()
            .is_ok());
    }
}
