//! Keeper configuration.

use serde::{Deserialize, Serialize};

use crate::gas::Gas;

pub const DEFAULT_GET_COINS_COST: Gas = 10;
pub const DEFAULT_HAS_COINS_COST: Gas = 10;
pub const DEFAULT_SET_COINS_COST: Gas = 100;
pub const DEFAULT_SUBTRACT_COINS_COST: Gas = 10;
pub const DEFAULT_ADD_COINS_COST: Gas = 10;

/// Fixed gas charged by each coin primitive.
///
/// Composite operations pay for the primitives they call, so `has_coins`
/// costs `has_coins + get_coins` and `subtract_coins` costs
/// `subtract_coins + get_coins + set_coins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    pub get_coins: Gas,
    pub has_coins: Gas,
    pub set_coins: Gas,
    pub subtract_coins: Gas,
    pub add_coins: Gas,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            get_coins: DEFAULT_GET_COINS_COST,
            has_coins: DEFAULT_HAS_COINS_COST,
            set_coins: DEFAULT_SET_COINS_COST,
            subtract_coins: DEFAULT_SUBTRACT_COINS_COST,
            add_coins: DEFAULT_ADD_COINS_COST,
        }
    }
}

impl GasSchedule {
    /// Defaults overridden by `PEGBANK_GAS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `PEGBANK_GAS_*` key. Unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut schedule = Self::default();
        let fields: [(&str, &mut Gas); 5] = [
            ("PEGBANK_GAS_GET_COINS", &mut schedule.get_coins),
            ("PEGBANK_GAS_HAS_COINS", &mut schedule.has_coins),
            ("PEGBANK_GAS_SET_COINS", &mut schedule.set_coins),
            ("PEGBANK_GAS_SUBTRACT_COINS", &mut schedule.subtract_coins),
            ("PEGBANK_GAS_ADD_COINS", &mut schedule.add_coins),
        ];
        for (key, slot) in fields {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<Gas>() {
                Ok(v) => *slot = v,
                Err(e) => {
                    tracing::warn!(key, value = %raw, error = %e, "ignoring invalid gas override");
                }
            }
        }
        schedule
    }
}
