// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::KernelError;
use crate::hash::entity_id;
use crate::snapshot::{AccountSnapshot, Snapshot, SnapshotBuilder};
use crate::state::{ChainState, State};
use crate::tests::fixtures::{account, block_id, hasher, id, signed_transfer};
use crate::types::{Block, ValidatedTransaction};

fn snapshot_at(n: u8, height: u64, balance: u64) -> AccountSnapshot {
    let mut builder = SnapshotBuilder::new(block_id(n), height);
    for i in 0..3 {
        builder.add_account(account(i, 10, balance, block_id(0))).unwrap();
    }
    builder.build(hasher()).unwrap()
}

#[test]
fn test_unknown_block_is_none() {
    let state = ChainState::with_genesis(snapshot_at(0, 0, 100)).unwrap();
    assert!(state.snapshot(&block_id(7)).is_none(), "no default snapshot");
    assert!(state.snapshot(&block_id(0)).is_some());
}

#[test]
fn test_empty_state_has_no_latest() {
    let state = ChainState::new();
    assert!(state.is_empty());
    assert!(state.last_finalized_snapshot().is_none());
}

#[test]
fn test_identical_snapshot_is_noop() {
    let state = ChainState::new();
    state.add_snapshot(snapshot_at(0, 0, 100)).unwrap();
    state.add_snapshot(snapshot_at(0, 0, 100)).unwrap();
    assert_eq!(state.len(), 1);
}

#[test]
fn test_conflicting_snapshot_rejected() {
    let state = ChainState::new();
    state.add_snapshot(snapshot_at(0, 0, 100)).unwrap();
    let err = state.add_snapshot(snapshot_at(0, 0, 99)).unwrap_err();
    assert!(matches!(err, KernelError::InvalidArgument(_)));
    assert_eq!(state.account_snapshot(&block_id(0)).unwrap().get_account(&id(0)).unwrap().balance, 100);
}

#[test]
fn test_latest_advances_only_upwards() {
    let state = ChainState::new();
    state.add_snapshot(snapshot_at(2, 2, 100)).unwrap();
    state.add_snapshot(snapshot_at(1, 1, 100)).unwrap();
    assert_eq!(state.last_finalized_snapshot().unwrap().reference_block_id(), block_id(2));

    state.add_snapshot(snapshot_at(3, 3, 100)).unwrap();
    assert_eq!(state.last_finalized_snapshot().unwrap().reference_block_height(), 3);
    assert_eq!(state.len(), 3);
    assert!(state.contains(&block_id(1)));
}

#[test]
fn test_finalize_block_applies_transfers() {
    let h = hasher();
    let state = ChainState::with_genesis(snapshot_at(0, 0, 100)).unwrap();

    let tx = signed_transfer(block_id(0), 0, 1, 40);
    let block = Block::new(block_id(0), id(2), 1, vec![ValidatedTransaction::new(tx, vec![])]);
    let next = state.finalize_block(&block, h.clone()).unwrap();
    let bid = entity_id(h.as_ref(), &block).unwrap();

    assert_eq!(next.reference_block_id(), bid);
    assert_eq!(next.reference_block_height(), 1);
    assert_eq!(next.get_account(&id(0)).unwrap().balance, 60);
    assert_eq!(next.get_account(&id(1)).unwrap().balance, 140);
    assert_eq!(next.get_account(&id(0)).unwrap().last_block_id, bid);
    assert_eq!(next.get_account(&id(2)).unwrap().last_block_id, block_id(0), "untouched account keeps its block");

    assert_eq!(state.last_finalized().unwrap().reference_block_id(), bid);
    assert_eq!(state.account_snapshot(&block_id(0)).unwrap().get_account(&id(0)).unwrap().balance, 100);
}

#[test]
fn test_finalize_block_rejects_overdraft() {
    let state = ChainState::with_genesis(snapshot_at(0, 0, 100)).unwrap();
    let tx = signed_transfer(block_id(0), 0, 1, 150);
    let block = Block::new(block_id(0), id(2), 1, vec![ValidatedTransaction::new(tx, vec![])]);
    assert!(state.finalize_block(&block, hasher()).unwrap_err().is_invalid_argument());
    assert_eq!(state.len(), 1);
}

#[test]
fn test_finalize_block_requires_known_parent_and_height() {
    let state = ChainState::with_genesis(snapshot_at(0, 0, 100)).unwrap();
    let orphan = Block::new(block_id(9), id(2), 1, vec![]);
    assert!(state.finalize_block(&orphan, hasher()).unwrap_err().is_not_found());

    let skipped = Block::new(block_id(0), id(2), 5, vec![]);
    assert!(state.finalize_block(&skipped, hasher()).unwrap_err().is_invalid_argument());
}
