// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod engine;
pub mod service;
pub mod supervisor;
pub mod telemetry;

use std::path::Path;
use std::sync::Arc;

use ledger_kernel::hash::Hasher;
use ledger_kernel::snapshot::{Snapshot, SnapshotFixture};
use ledger_kernel::state::ChainState;

use crate::errors::NodeError;

/// Chain state seeded from a JSON snapshot fixture.
pub fn load_genesis(path: &Path, hasher: Arc<dyn Hasher>) -> Result<ChainState, NodeError> {
    let raw = std::fs::read_to_string(path)?;
    let fixture: SnapshotFixture = serde_json::from_str(&raw)?;
    let genesis = fixture.build(hasher)?;
    tracing::info!(
        block = %genesis.reference_block_id(),
        height = genesis.reference_block_height(),
        accounts = genesis.account_count(),
        root = %genesis.accounts_root(),
        "genesis loaded"
    );
    Ok(ChainState::with_genesis(genesis)?)
}
