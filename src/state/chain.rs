// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory chain of finalized account snapshots.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::{KernelError, Result};
use crate::hash::{entity_id, Hasher};
use crate::snapshot::{AccountSnapshot, Snapshot};
use crate::state::State;
use crate::types::{Block, Identifier};

#[derive(Default)]
struct Inner {
    snapshots: FxHashMap<Identifier, Arc<AccountSnapshot>>,
    last_finalized: Option<Identifier>,
}

/// Grows by whole snapshots; a snapshot is never modified once added.
#[derive(Default)]
pub struct ChainState {
    inner: RwLock<Inner>,
}

impl ChainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genesis(genesis: AccountSnapshot) -> Result<Self> {
        let state = Self::new();
        state.add_snapshot(genesis)?;
        Ok(state)
    }

    /// Adds a finalized snapshot. Re-adding the same snapshot is a no-op; a
    /// different snapshot for a known block is `InvalidArgument`.
    pub fn add_snapshot(&self, snapshot: AccountSnapshot) -> Result<Arc<AccountSnapshot>> {
        let block_id = snapshot.reference_block_id();
        let height = snapshot.reference_block_height();
        let mut inner = self.inner.write();

        if let Some(existing) = inner.snapshots.get(&block_id) {
            if existing.same_as(&snapshot) {
                return Ok(Arc::clone(existing));
            }
            return Err(KernelError::InvalidArgument(format!(
                "conflicting snapshot for block {}",
                block_id
            )));
        }

        let snapshot = Arc::new(snapshot);
        inner.snapshots.insert(block_id, Arc::clone(&snapshot));

        let advance = match inner.last_finalized {
            Some(last) => inner
                .snapshots
                .get(&last)
                .map_or(true, |s| height > s.reference_block_height()),
            None => true,
        };
        if advance {
            inner.last_finalized = Some(block_id);
        }

        debug!(block = %block_id, height, latest = advance, "snapshot added");
        Ok(snapshot)
    }

    pub fn account_snapshot(&self, block_id: &Identifier) -> Option<Arc<AccountSnapshot>> {
        self.inner.read().snapshots.get(block_id).cloned()
    }

    pub fn last_finalized(&self) -> Option<Arc<AccountSnapshot>> {
        let inner = self.inner.read();
        inner
            .last_finalized
            .and_then(|id| inner.snapshots.get(&id).cloned())
    }

    pub fn contains(&self, block_id: &Identifier) -> bool {
        self.inner.read().snapshots.contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().snapshots.is_empty()
    }

    /// Applies the transfers of an accepted block on top of its previous
    /// snapshot and records the result under the block's identifier.
    ///
    /// The block is assumed validated; balances are still checked so an
    /// overdraft surfaces as `InvalidArgument` instead of wrapping.
    pub fn finalize_block(&self, block: &Block, hasher: Arc<dyn Hasher>) -> Result<Arc<AccountSnapshot>> {
        let previous = self
            .account_snapshot(&block.previous_block_id)
            .ok_or_else(|| KernelError::NotFound(format!("block {}", block.previous_block_id)))?;

        let expected_height = previous.reference_block_height() + 1;
        if block.height != expected_height {
            return Err(KernelError::InvalidArgument(format!(
                "block height {} does not follow {}",
                block.height,
                previous.reference_block_height()
            )));
        }

        let block_id = entity_id(hasher.as_ref(), block)?;
        let mut builder = previous.successor(block_id, block.height);

        for validated in &block.transactions {
            let tx = &validated.transaction;

            let mut sender = builder
                .account(&tx.sender)
                .cloned()
                .ok_or_else(|| KernelError::NotFound(format!("sender {}", tx.sender)))?;
            sender.balance = sender.balance.checked_sub(tx.amount).ok_or_else(|| {
                KernelError::InvalidArgument(format!(
                    "sender {} balance {} below {}",
                    tx.sender, sender.balance, tx.amount
                ))
            })?;
            sender.last_block_id = block_id;
            builder.update_account(sender)?;

            let mut receiver = builder
                .account(&tx.receiver)
                .cloned()
                .ok_or_else(|| KernelError::NotFound(format!("receiver {}", tx.receiver)))?;
            receiver.balance = receiver
                .balance
                .checked_add(tx.amount)
                .ok_or_else(|| KernelError::InvalidArgument(format!("receiver {} balance overflow", tx.receiver)))?;
            receiver.last_block_id = block_id;
            builder.update_account(receiver)?;
        }

        let snapshot = self.add_snapshot(builder.build(hasher)?)?;
        info!(block = %block_id, height = block.height, txs = block.transactions.len(), "block finalized");
        Ok(snapshot)
    }
}

impl State for ChainState {
    fn snapshot(&self, block_id: &Identifier) -> Option<Arc<dyn Snapshot>> {
        self.account_snapshot(block_id)
            .map(|s| s as Arc<dyn Snapshot>)
    }

    fn last_finalized_snapshot(&self) -> Option<Arc<dyn Snapshot>> {
        self.last_finalized().map(|s| s as Arc<dyn Snapshot>)
    }
}
