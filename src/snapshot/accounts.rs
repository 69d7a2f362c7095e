// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! ADS-backed account snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ads::MerkleTree;
use crate::error::{KernelError, Result};
use crate::hash::{entity_id, Hasher};
use crate::proof::AuthenticatedEntity;
use crate::snapshot::Snapshot;
use crate::types::{Account, Identifier};

/// Collects accounts for a snapshot that is not final yet.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    reference_block_id: Identifier,
    reference_block_height: u64,
    accounts: BTreeMap<Identifier, Account>,
}

impl SnapshotBuilder {
    pub fn new(reference_block_id: Identifier, reference_block_height: u64) -> Self {
        Self {
            reference_block_id,
            reference_block_height,
            accounts: BTreeMap::new(),
        }
    }

    /// Fails with `InvalidArgument` if an account with the same identifier
    /// was already added.
    pub fn add_account(&mut self, account: Account) -> Result<&mut Self> {
        if self.accounts.contains_key(&account.identifier) {
            return Err(KernelError::InvalidArgument(format!(
                "duplicate account {}",
                account.identifier
            )));
        }
        self.accounts.insert(account.identifier, account);
        Ok(self)
    }

    /// Replaces an account carried over by [`AccountSnapshot::successor`].
    pub fn update_account(&mut self, account: Account) -> Result<&mut Self> {
        match self.accounts.get_mut(&account.identifier) {
            Some(slot) => {
                *slot = account;
                Ok(self)
            }
            None => Err(KernelError::NotFound(format!("account {}", account.identifier))),
        }
    }

    pub fn account(&self, id: &Identifier) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Finalizes the snapshot. No account can be added afterwards.
    pub fn build(self, hasher: Arc<dyn Hasher>) -> Result<AccountSnapshot> {
        let mut leaves = BTreeMap::new();
        for account in self.accounts.values() {
            leaves.insert(account.identifier, entity_id(hasher.as_ref(), account)?);
        }
        let mut tree = MerkleTree::new(hasher);
        tree.put_all(self.accounts.values().cloned())?;

        Ok(AccountSnapshot {
            reference_block_id: self.reference_block_id,
            reference_block_height: self.reference_block_height,
            accounts: self.accounts,
            leaves,
            tree,
        })
    }
}

/// Immutable view of every account as of one finalized block.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    reference_block_id: Identifier,
    reference_block_height: u64,
    accounts: BTreeMap<Identifier, Account>,
    /// account identifier -> leaf (entity hash) in `tree`
    leaves: BTreeMap<Identifier, Identifier>,
    tree: MerkleTree<Account>,
}

impl AccountSnapshot {
    /// Root of the Merkle tree over this snapshot's accounts.
    pub fn accounts_root(&self) -> Identifier {
        self.tree.root()
    }

    /// The account of `id` with a proof against `accounts_root()`.
    pub fn authenticated_account(&self, id: &Identifier) -> Result<AuthenticatedEntity<Account>> {
        let leaf = self
            .leaves
            .get(id)
            .ok_or_else(|| KernelError::NotFound(format!("account {}", id)))?;
        self.tree.get(leaf)
    }

    pub fn hasher(&self) -> &Arc<dyn Hasher> {
        self.tree.hasher()
    }

    /// Starts a builder for a successor snapshot, seeded with these accounts.
    pub fn successor(&self, reference_block_id: Identifier, reference_block_height: u64) -> SnapshotBuilder {
        SnapshotBuilder {
            reference_block_id,
            reference_block_height,
            accounts: self.accounts.clone(),
        }
    }

    /// Same block, height and account set.
    pub fn same_as(&self, other: &AccountSnapshot) -> bool {
        self.reference_block_id == other.reference_block_id
            && self.reference_block_height == other.reference_block_height
            && self.accounts_root() == other.accounts_root()
    }
}

impl Snapshot for AccountSnapshot {
    fn reference_block_id(&self) -> Identifier {
        self.reference_block_id
    }

    fn reference_block_height(&self) -> u64 {
        self.reference_block_height
    }

    fn get_account(&self, id: &Identifier) -> Option<&Account> {
        self.accounts.get(id)
    }

    fn all(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }
}
