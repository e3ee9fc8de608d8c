//! Multi-denomination fungible amounts.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// An amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: i64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl core::fmt::Display for Coin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| LedgerError::invalid_coins(format!("missing denomination in '{s}'")))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(LedgerError::invalid_coins(format!("missing amount in '{s}'")));
        }
        let amount = amount
            .parse::<i64>()
            .map_err(|e| LedgerError::invalid_coins(format!("'{s}': {e}")))?;
        validate_denom(denom)?;
        Ok(Self::new(denom, amount))
    }
}

/// A balance over several denominations.
///
/// Canonical form: sorted by denomination, one entry per denomination, no
/// zero amounts. Every constructor canonicalises, deserialization included.
/// `checked_minus` is the only operation that can produce negative entries;
/// callers check [`Coins::is_not_negative`] before storing such a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Empty balance.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build canonical coins from arbitrary entries.
    ///
    /// Duplicate denominations are summed and zero entries dropped. Negative
    /// amounts and malformed denominations are rejected.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> LedgerResult<Self> {
        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if coin.amount < 0 {
                return Err(LedgerError::invalid_coins(format!(
                    "negative amount {coin}"
                )));
            }
            let Coin { denom, amount } = coin;
            let entry = map.entry(denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(amount)
                .ok_or(LedgerError::AmountOverflow { denom })?;
        }
        Ok(Self::from_map(map))
    }

    fn from_map(map: BTreeMap<String, i64>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, amount)| *amount != 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    fn to_map(&self) -> BTreeMap<String, i64> {
        self.0
            .iter()
            .map(|c| (c.denom.clone(), c.amount))
            .collect()
    }

    /// Amount held in `denom` (zero when absent).
    pub fn amount_of(&self, denom: &str) -> i64 {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|idx| self.0[idx].amount)
            .unwrap_or(0)
    }

    /// Per-denomination sum.
    pub fn checked_plus(&self, other: &Coins) -> LedgerResult<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or_else(|| LedgerError::AmountOverflow {
                    denom: coin.denom.clone(),
                })?;
        }
        Ok(Self::from_map(map))
    }

    /// Per-denomination difference. The result may hold negative amounts.
    pub fn checked_minus(&self, other: &Coins) -> LedgerResult<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_sub(coin.amount)
                .ok_or_else(|| LedgerError::AmountOverflow {
                    denom: coin.denom.clone(),
                })?;
        }
        Ok(Self::from_map(map))
    }

    /// True when no denomination is below zero.
    pub fn is_not_negative(&self) -> bool {
        self.0.iter().all(|c| c.amount >= 0)
    }

    /// True when `self` holds at least `other` in every denomination of `other`.
    pub fn is_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// True for the canonical zero balance.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Strictly sorted, all amounts positive, all denominations well formed.
    ///
    /// Fails only for `checked_minus` results holding negative entries.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|c| c.is_positive() && validate_denom(&c.denom).is_ok())
            && self.0.windows(2).all(|w| w[0].denom < w[1].denom)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Coin> {
        self.0
    }
}

impl TryFrom<Coin> for Coins {
    type Error = LedgerError;

    /// Single-denomination coins. Zero amounts collapse to the empty balance.
    fn try_from(coin: Coin) -> Result<Self, Self::Error> {
        Self::new([coin])
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = LedgerError;

    fn try_from(value: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(value: Coins) -> Self {
        value.0
    }
}

impl core::fmt::Display for Coins {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = LedgerError;

    /// Parses `"100atom,5stake"`. The empty string is the zero balance.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

fn validate_denom(denom: &str) -> LedgerResult<()> {
    let mut chars = denom.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(LedgerError::invalid_coins(format!(
                "denomination '{denom}' must start with a letter"
            )));
        }
    }
    if !chars.all(|c| c.is_ascii_alphanumeric()) {
        return Err(LedgerError::invalid_coins(format!(
            "denomination '{denom}' must be alphanumeric"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn new_sorts_merges_and_drops_zeros() {
        let c = Coins::new(vec![
            Coin::new("stake", 5),
            Coin::new("atom", 10),
            Coin::new("atom", 15),
            Coin::new("btc", 0),
        ])
        .unwrap();
        assert_eq!(
            c.clone().into_vec(),
            vec![Coin::new("atom", 25), Coin::new("stake", 5)]
        );
        assert!(c.is_valid());
    }

    #[test]
    fn new_rejects_negative_and_bad_denoms() {
        assert!(matches!(
            Coins::new(vec![Coin::new("atom", -1)]),
            Err(LedgerError::InvalidCoins(_))
        ));
        assert!(matches!(
            Coins::new(vec![Coin::new("1atom", 1)]),
            Err(LedgerError::InvalidCoins(_))
        ));
        assert!(matches!(
            Coins::new(vec![Coin::new("", 1)]),
            Err(LedgerError::InvalidCoins(_))
        ));
    }

    #[test]
    fn display_and_parse_agree() {
        let c = coins("5stake, 100atom");
        assert_eq!(c.to_string(), "100atom,5stake");
        assert_eq!(coins(&c.to_string()), c);
        assert_eq!(coins(""), Coins::empty());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!("atom".parse::<Coins>().is_err());
        assert!("100".parse::<Coins>().is_err());
        assert!("10at-om".parse::<Coins>().is_err());
    }

    #[test]
    fn minus_treats_missing_denominations_as_zero() {
        let diff = coins("70atom").checked_minus(&coins("10stake")).unwrap();
        assert_eq!(diff.amount_of("atom"), 70);
        assert_eq!(diff.amount_of("stake"), -10);
        assert!(!diff.is_not_negative());
    }

    #[test]
    fn plus_overflow_is_reported() {
        let max = Coins::try_from(Coin::new("atom", i64::MAX)).unwrap();
        let err = max.checked_plus(&coins("1atom")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::AmountOverflow {
                denom: "atom".to_string()
            }
        );
    }

    #[test]
    fn is_gte_ignores_extra_denominations_in_balance() {
        let balance = coins("100atom,5stake");
        assert!(balance.is_gte(&coins("100atom")));
        assert!(balance.is_gte(&Coins::empty()));
        assert!(!balance.is_gte(&coins("101atom")));
        assert!(!balance.is_gte(&coins("1btc")));
    }

    #[test]
    fn from_single_zero_coin_is_empty() {
        assert!(Coins::try_from(Coin::new("atom", 0)).unwrap().is_zero());
    }

    #[test]
    fn from_single_negative_coin_is_rejected() {
        assert!(matches!(
            Coins::try_from(Coin::new("atom", -5)),
            Err(LedgerError::InvalidCoins(_))
        ));
    }

    #[test]
    fn deserialize_rejects_negative_amounts() {
        let raw = r#"[{"denom":"atom","amount":-100}]"#;
        assert!(serde_json::from_str::<Coins>(raw).is_err());
    }

    #[test]
    fn deserialize_rejects_bad_denominations() {
        let raw = r#"[{"denom":"9lives","amount":1}]"#;
        assert!(serde_json::from_str::<Coins>(raw).is_err());
    }

    #[test]
    fn deserialize_canonicalises_unsorted_and_duplicate_entries() {
        let raw = r#"[{"denom":"stake","amount":1},{"denom":"btc","amount":1},{"denom":"atom","amount":60},{"denom":"atom","amount":40}]"#;
        let c: Coins = serde_json::from_str(raw).unwrap();
        assert_eq!(c, coins("100atom,1btc,1stake"));
        assert!(c.is_valid());
        assert_eq!(c.amount_of("atom"), 100);
        assert!(c.is_gte(&coins("50atom")));
    }

    #[test]
    fn serialized_form_is_a_plain_list() {
        let json = serde_json::to_string(&coins("5stake,100atom")).unwrap();
        assert_eq!(
            json,
            r#"[{"denom":"atom","amount":100},{"denom":"stake","amount":5}]"#
        );
    }

    fn arb_coins() -> impl Strategy<Value = Coins> {
        prop::collection::vec(
            (prop::sample::select(vec!["atom", "stake", "btc"]), 0i64..1_000_000),
            0..4,
        )
        .prop_map(|entries| {
            Coins::new(entries.into_iter().map(|(d, a)| Coin::new(d, a))).unwrap()
        })
    }

    proptest! {
        /// Property: adding then subtracting the same coins is the identity.
        #[test]
        fn plus_then_minus_round_trips(a in arb_coins(), b in arb_coins()) {
            let sum = a.checked_plus(&b).unwrap();
            prop_assert_eq!(sum.checked_minus(&b).unwrap(), a);
        }

        /// Property: `is_gte` agrees with the sign of the difference.
        #[test]
        fn is_gte_matches_non_negative_difference(a in arb_coins(), b in arb_coins()) {
            let diff = a.checked_minus(&b).unwrap();
            prop_assert_eq!(a.is_gte(&b), diff.is_not_negative());
        }

        /// Property: arithmetic results stay canonical.
        #[test]
        fn results_have_no_zero_entries(a in arb_coins(), b in arb_coins()) {
            let diff = a.checked_minus(&b).unwrap();
            prop_assert!(diff.iter().all(|c| c.amount != 0));
            prop_assert!(diff.iter().zip(diff.iter().skip(1)).all(|(x, y)| x.denom < y.denom));
        }
    }
}
