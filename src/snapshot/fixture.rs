// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Portable snapshot description, used for genesis files and offline
//! verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::Hasher;
use crate::snapshot::{AccountSnapshot, Snapshot, SnapshotBuilder};
use crate::types::{Account, Identifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFixture {
    pub reference_block_id: Identifier,
    pub reference_block_height: u64,
    pub accounts: Vec<Account>,
}

impl SnapshotFixture {
    /// Fails with `InvalidArgument` on a repeated account identifier.
    pub fn build(self, hasher: Arc<dyn Hasher>) -> Result<AccountSnapshot> {
        let mut builder = SnapshotBuilder::new(self.reference_block_id, self.reference_block_height);
        for account in self.accounts {
            builder.add_account(account)?;
        }
        builder.build(hasher)
    }

    pub fn from_snapshot(snapshot: &dyn Snapshot) -> Self {
        Self {
            reference_block_id: snapshot.reference_block_id(),
            reference_block_height: snapshot.reference_block_height(),
            accounts: snapshot.all().into_iter().cloned().collect(),
        }
    }
}
