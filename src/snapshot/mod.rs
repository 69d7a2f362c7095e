// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Point-in-time account views.

use crate::types::{Account, Identifier};

pub mod accounts;
pub mod decode;
pub mod encode;
pub mod fixture;

pub use accounts::{AccountSnapshot, SnapshotBuilder};
pub use fixture::SnapshotFixture;

/// Accounts as of one finalized block. Implementations are immutable once
/// handed out.
pub trait Snapshot: Send + Sync {
    fn reference_block_id(&self) -> Identifier;

    fn reference_block_height(&self) -> u64;

    fn get_account(&self, id: &Identifier) -> Option<&Account>;

    /// Every account, in an order that is stable for this snapshot.
    fn all(&self) -> Vec<&Account>;

    fn account_count(&self) -> usize {
        self.all().len()
    }
}
