//! Account store boundary.
//!
//! The ledger reads and writes account records through [`AccountStore`] and
//! makes no assumptions about how they are persisted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use pegbank_core::{AccountAddress, LedgerError};

use crate::account::Account;

/// Account store operation error.
///
/// Infrastructure failures only. A missing account is never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("lock poisoned")]
    Poisoned,

    #[error("write rejected for {address}: {reason}")]
    Rejected {
        address: AccountAddress,
        reason: String,
    },
}

impl From<StoreError> for LedgerError {
    fn from(value: StoreError) -> Self {
        LedgerError::store(value.to_string())
    }
}

/// Keyed store of account records.
pub trait AccountStore: Send + Sync {
    /// Load an account, `None` if it was never written.
    fn get(&self, address: &AccountAddress) -> Option<Account>;

    /// Build a fresh record for `address`. Nothing is persisted until `put`.
    fn create(&self, address: AccountAddress) -> Account {
        Account::new(address)
    }

    /// Insert or replace the record keyed by `account.address()`.
    fn put(&self, account: Account) -> Result<(), StoreError>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn get(&self, address: &AccountAddress) -> Option<Account> {
        (**self).get(address)
    }

    fn create(&self, address: AccountAddress) -> Account {
        (**self).create(address)
    }

    fn put(&self, account: Account) -> Result<(), StoreError> {
        (**self).put(account)
    }
}

/// In-memory account store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountAddress, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts. A poisoned store reports zero.
    pub fn len(&self) -> usize {
        match self.accounts.read() {
            Ok(map) => map.len(),
            Err(_) => {
                tracing::warn!("account store lock poisoned, reporting no accounts");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, address: &AccountAddress) -> Option<Account> {
        let Ok(map) = self.accounts.read() else {
            tracing::warn!(%address, "account store lock poisoned, reading account as absent");
            return None;
        };
        map.get(address).cloned()
    }

    fn put(&self, account: Account) -> Result<(), StoreError> {
        let mut map = self.accounts.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(account.address(), account);
        Ok(())
    }
}
