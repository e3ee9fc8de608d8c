//! Account records and the asset pegs they hold.

use serde::{Deserialize, Serialize};

use pegbank_core::{AccountAddress, Coins, PegHash};

/// A uniquely identified, non-fungible asset instance.
///
/// `peg_hash` is owned by the ledger: issuance overwrites whatever the
/// caller put there with the identifier popped from the issuer's pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPeg {
    pub peg_hash: PegHash,
    pub document_hash: String,
    pub asset_type: String,
    pub asset_quantity: i64,
    pub quantity_unit: String,
    pub locked: bool,
}

impl AssetPeg {
    /// Pool entry carrying only an identifier.
    pub fn with_peg_hash(peg_hash: PegHash) -> Self {
        Self {
            peg_hash,
            ..Self::default()
        }
    }
}

/// Ordered pool of asset pegs held by one account.
///
/// Issuance consumes from the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPegWallet(Vec<AssetPeg>);

impl AssetPegWallet {
    pub fn new(pegs: Vec<AssetPeg>) -> Self {
        Self(pegs)
    }

    pub fn push(&mut self, peg: AssetPeg) {
        self.0.push(peg);
    }

    /// Remove and return the most recently added peg.
    pub fn pop(&mut self) -> Option<AssetPeg> {
        self.0.pop()
    }

    pub fn last(&self) -> Option<&AssetPeg> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetPeg> {
        self.0.iter()
    }

    pub fn contains_peg_hash(&self, peg_hash: &PegHash) -> bool {
        self.0.iter().any(|p| &p.peg_hash == peg_hash)
    }
}

impl FromIterator<AssetPeg> for AssetPegWallet {
    fn from_iter<I: IntoIterator<Item = AssetPeg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Account record as kept by an [`AccountStore`](crate::store::AccountStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    address: AccountAddress,
    coins: Coins,
    asset_peg_wallet: AssetPegWallet,
}

impl Account {
    /// Fresh record: zero balance, empty wallet.
    pub fn new(address: AccountAddress) -> Self {
        Self {
            address,
            coins: Coins::empty(),
            asset_peg_wallet: AssetPegWallet::default(),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn coins(&self) -> &Coins {
        &self.coins
    }

    pub fn set_coins(&mut self, coins: Coins) {
        self.coins = coins;
    }

    pub fn asset_peg_wallet(&self) -> &AssetPegWallet {
        &self.asset_peg_wallet
    }

    pub fn set_asset_peg_wallet(&mut self, wallet: AssetPegWallet) {
        self.asset_peg_wallet = wallet;
    }

    pub fn into_coins(self) -> Coins {
        self.coins
    }

    pub fn into_asset_peg_wallet(self) -> AssetPegWallet {
        self.asset_peg_wallet
    }
}
