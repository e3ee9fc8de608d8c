//! Strongly-typed byte identifiers used across the ledger.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Length in bytes of an account address.
pub const ADDRESS_LEN: usize = 20;

/// Identifier of an account (store key).
///
/// Addresses are fixed-length byte strings. Their textual form is upper-case
/// hex, which is also what ends up in emitted tags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress([u8; ADDRESS_LEN]);

/// Identifier of an asset peg instance.
///
/// Variable length; assigned by the ledger when an instance is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PegHash(Vec<u8>);

impl AccountAddress {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, LedgerError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            LedgerError::invalid_address(format!(
                "expected {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn from_decoded(bytes: Vec<u8>) -> Result<Self, LedgerError> {
        Self::from_slice(&bytes)
    }

    /// True for the all-zero address, which never names a real account.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl PegHash {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    fn from_decoded(bytes: Vec<u8>) -> Result<Self, LedgerError> {
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

macro_rules! impl_hex_newtype {
    ($t:ident, $invalid:path) => {
        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&hex::encode_upper(&self.0))
            }
        }

        impl FromStr for $t {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s).map_err(|e| $invalid(e.to_string()))?;
                $t::from_decoded(bytes)
            }
        }

        impl TryFrom<String> for $t {
            type Error = LedgerError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.to_string()
            }
        }
    };
}

impl_hex_newtype!(AccountAddress, LedgerError::invalid_address);
impl_hex_newtype!(PegHash, LedgerError::invalid_peg_hash);

impl From<[u8; ADDRESS_LEN]> for AccountAddress {
    fn from(value: [u8; ADDRESS_LEN]) -> Self {
        Self(value)
    }
}
