// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Finalized chain state.

use std::sync::Arc;

use crate::snapshot::Snapshot;
use crate::types::Identifier;

pub mod chain;

pub use chain::ChainState;

/// Every finalized snapshot, keyed by the block it was taken at.
pub trait State: Send + Sync {
    /// `None` for a block that was never finalized. There is no default
    /// snapshot.
    fn snapshot(&self, block_id: &Identifier) -> Option<Arc<dyn Snapshot>>;

    fn last_finalized_snapshot(&self) -> Option<Arc<dyn Snapshot>>;
}
