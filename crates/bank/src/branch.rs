//! Write-buffering store view for caller-side checkpoint/revert.
//!
//! Ledger operations commit every step straight to the store they are given.
//! A caller that wants all-or-nothing semantics for a multi-step operation
//! runs it against a [`BranchStore`] and only calls [`BranchStore::commit`]
//! when the whole operation succeeded. Dropping the branch discards it.

use std::collections::BTreeMap;
use std::sync::RwLock;

use pegbank_core::AccountAddress;

use crate::account::Account;
use crate::store::{AccountStore, StoreError};

pub struct BranchStore<'a> {
    parent: &'a dyn AccountStore,
    writes: RwLock<BTreeMap<AccountAddress, Account>>,
}

impl<'a> BranchStore<'a> {
    pub fn new(parent: &'a dyn AccountStore) -> Self {
        Self {
            parent,
            writes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of accounts written since the branch was opened.
    pub fn pending(&self) -> usize {
        match self.writes.read() {
            Ok(writes) => writes.len(),
            Err(_) => {
                tracing::warn!("branch buffer lock poisoned, reporting no pending writes");
                0
            }
        }
    }

    /// Flush buffered writes to the parent in address order.
    ///
    /// Returns the number of accounts written. If the parent rejects a write,
    /// the accounts already flushed are written back with their previous
    /// records before the error is returned. An account the parent did not
    /// hold before is written back as a fresh, empty record, since the store
    /// contract has no delete. A failed write-back is logged and the
    /// original error is still returned.
    pub fn commit(self) -> Result<usize, StoreError> {
        let Self { parent, writes } = self;
        let writes = writes.into_inner().map_err(|_| StoreError::Poisoned)?;
        let count = writes.len();
        let mut flushed: Vec<(AccountAddress, Option<Account>)> = Vec::with_capacity(count);
        for (address, account) in writes {
            let previous = parent.get(&address);
            if let Err(err) = parent.put(account) {
                tracing::warn!(%address, error = %err, flushed = flushed.len(), "branch commit failed, rolling back");
                roll_back(parent, flushed);
                return Err(err);
            }
            flushed.push((address, previous));
        }
        tracing::debug!(accounts = count, "branch committed");
        Ok(count)
    }

    /// Drop buffered writes. Equivalent to dropping the branch.
    pub fn discard(self) {
        tracing::debug!(accounts = self.pending(), "branch discarded");
    }
}

fn roll_back(parent: &dyn AccountStore, flushed: Vec<(AccountAddress, Option<Account>)>) {
    for (address, previous) in flushed.into_iter().rev() {
        let record = previous.unwrap_or_else(|| parent.create(address));
        if let Err(err) = parent.put(record) {
            tracing::error!(%address, error = %err, "failed to roll back branch write");
        }
    }
}

impl core::fmt::Debug for BranchStore<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BranchStore")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl AccountStore for BranchStore<'_> {
    fn get(&self, address: &AccountAddress) -> Option<Account> {
        let Ok(writes) = self.writes.read() else {
            tracing::warn!(%address, "branch buffer lock poisoned, reading account as absent");
            return None;
        };
        match writes.get(address) {
            Some(account) => Some(account.clone()),
            None => self.parent.get(address),
        }
    }

    fn create(&self, address: AccountAddress) -> Account {
        self.parent.create(address)
    }

    fn put(&self, account: Account) -> Result<(), StoreError> {
        let mut writes = self.writes.write().map_err(|_| StoreError::Poisoned)?;
        writes.insert(account.address(), account);
        Ok(())
    }
}
