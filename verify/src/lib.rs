// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Offline checks over a snapshot file.
//!
//! A snapshot file is either a JSON fixture
//! `{ reference_block_id, reference_block_height, accounts }` or the binary
//! `LGSN` container written by `pack`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use ledger_kernel::assignment::ValidatorAssigner;
use ledger_kernel::hash::Hasher;
use ledger_kernel::proof::AuthenticatedEntity;
use ledger_kernel::snapshot::decode::decode_snapshot;
use ledger_kernel::snapshot::encode::{encode_snapshot, MAGIC};
use ledger_kernel::snapshot::{AccountSnapshot, Snapshot, SnapshotFixture};
use ledger_kernel::types::{Account, Identifier};
use ledger_kernel::verify::{AuthenticatedEntityVerifier, MerkleVerifier};

#[derive(Debug, Serialize)]
pub struct RootReport {
    pub reference_block_id: Identifier,
    pub reference_block_height: u64,
    pub accounts: usize,
    pub accounts_root: Identifier,
}

#[derive(Debug, Serialize)]
pub struct AssignReport {
    pub entity: Identifier,
    pub tag: String,
    pub min_stake: u64,
    pub members: Vec<Identifier>,
}

#[derive(Debug, Serialize)]
pub struct ProveReport {
    pub authenticated: AuthenticatedEntity<Account>,
    pub verified: bool,
}

pub fn load_snapshot(path: &Path, hasher: Arc<dyn Hasher>) -> Result<AccountSnapshot> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.starts_with(MAGIC) {
        return decode_snapshot(&bytes, hasher).context("Failed to decode snapshot container");
    }
    let fixture: SnapshotFixture =
        serde_json::from_slice(&bytes).context("Failed to parse snapshot JSON")?;
    fixture.build(hasher).context("Invalid snapshot fixture")
}

pub fn root_report(snapshot: &AccountSnapshot) -> RootReport {
    RootReport {
        reference_block_id: snapshot.reference_block_id(),
        reference_block_height: snapshot.reference_block_height(),
        accounts: snapshot.account_count(),
        accounts_root: snapshot.accounts_root(),
    }
}

pub fn assign_report(
    snapshot: &AccountSnapshot,
    hasher: Arc<dyn Hasher>,
    entity: Identifier,
    tag: &str,
    count: usize,
    min_stake: u64,
) -> Result<AssignReport> {
    let assignment = ValidatorAssigner::new(hasher, min_stake)
        .assign(&entity, tag, snapshot, count)
        .context("Assignment failed")?;
    Ok(AssignReport {
        entity,
        tag: tag.to_string(),
        min_stake,
        members: assignment.all().to_vec(),
    })
}

pub fn prove_report(snapshot: &AccountSnapshot, hasher: Arc<dyn Hasher>, account: &Identifier) -> Result<ProveReport> {
    let authenticated = snapshot
        .authenticated_account(account)
        .with_context(|| format!("No proof for account {}", account))?;
    let verified = MerkleVerifier::new(hasher).verify_against(&authenticated, &snapshot.accounts_root());
    Ok(ProveReport {
        authenticated,
        verified,
    })
}

/// Writes the binary container for `snapshot` to `out`.
pub fn pack(snapshot: &AccountSnapshot, out: &Path) -> Result<usize> {
    let bytes = encode_snapshot(snapshot).context("Failed to encode snapshot")?;
    fs::write(out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(bytes.len())
}
