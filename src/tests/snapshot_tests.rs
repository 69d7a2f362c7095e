// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::KernelError;
use crate::snapshot::decode::decode_snapshot;
use crate::snapshot::encode::encode_snapshot;
use crate::snapshot::{AccountSnapshot, Snapshot, SnapshotBuilder};
use crate::tests::fixtures::{account, block_id, hasher, id};
use crate::verify::{AuthenticatedEntityVerifier, MerkleVerifier};

fn genesis(n: u8) -> AccountSnapshot {
    let mut builder = SnapshotBuilder::new(block_id(0), 0);
    for i in 0..n {
        builder.add_account(account(i, 10 * i as u64, 100, block_id(0))).unwrap();
    }
    builder.build(hasher()).unwrap()
}

#[test]
fn test_builder_rejects_duplicate_account() {
    let mut builder = SnapshotBuilder::new(block_id(0), 0);
    builder.add_account(account(1, 10, 100, block_id(0))).unwrap();
    let err = builder.add_account(account(1, 20, 5, block_id(0))).unwrap_err();
    assert!(matches!(err, KernelError::InvalidArgument(_)));
    assert_eq!(builder.len(), 1);
}

#[test]
fn test_update_of_absent_account_is_not_found() {
    let mut builder = SnapshotBuilder::new(block_id(0), 0);
    assert!(builder.update_account(account(1, 10, 100, block_id(0))).unwrap_err().is_not_found());
}

#[test]
fn test_lookup_and_stable_order() {
    let snap = genesis(5);
    assert_eq!(snap.reference_block_id(), block_id(0));
    assert_eq!(snap.reference_block_height(), 0);
    assert_eq!(snap.account_count(), 5);
    assert_eq!(snap.get_account(&id(3)).map(|a| a.stake), Some(30));
    assert!(snap.get_account(&id(42)).is_none());

    let first: Vec<_> = snap.all().iter().map(|a| a.identifier).collect();
    let second: Vec<_> = snap.all().iter().map(|a| a.identifier).collect();
    assert_eq!(first, second);
}

#[test]
fn test_authenticated_account_verifies_against_root() {
    let snap = genesis(6);
    let verifier = MerkleVerifier::new(hasher());
    for i in 0..6 {
        let ae = snap.authenticated_account(&id(i)).unwrap();
        assert_eq!(ae.entity.identifier, id(i));
        assert!(verifier.verify_against(&ae, &snap.accounts_root()));
    }
    assert!(snap.authenticated_account(&id(99)).unwrap_err().is_not_found());
}

#[test]
fn test_successor_does_not_touch_parent() {
    let parent = genesis(3);
    let mut builder = parent.successor(block_id(1), 1);
    let mut changed = builder.account(&id(1)).cloned().unwrap();
    changed.balance = 1;
    builder.update_account(changed).unwrap();
    let child = builder.build(hasher()).unwrap();

    assert_eq!(parent.get_account(&id(1)).unwrap().balance, 100);
    assert_eq!(child.get_account(&id(1)).unwrap().balance, 1);
    assert_ne!(parent.accounts_root(), child.accounts_root());
    assert!(!parent.same_as(&child));
}

#[test]
fn test_binary_container_round_trip() {
    let snap = genesis(4);
    let bytes = encode_snapshot(&snap).unwrap();
    assert_eq!(&bytes[..4], b"LGSN");

    let restored = decode_snapshot(&bytes, hasher()).unwrap();
    assert!(restored.same_as(&snap));
    assert_eq!(restored.all(), snap.all());
}

#[test]
fn test_decode_detects_corruption() {
    let snap = genesis(3);
    let bytes = encode_snapshot(&snap).unwrap();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(matches!(decode_snapshot(&bad_magic, hasher()), Err(KernelError::Codec(_))));

    let mut bad_root = bytes.clone();
    let last = bad_root.len() - 1;
    bad_root[last] ^= 0xFF;
    assert!(matches!(decode_snapshot(&bad_root, hasher()), Err(KernelError::Codec(_))));

    assert!(decode_snapshot(&bytes[..bytes.len() - 5], hasher()).is_err());

    let mut trailing = bytes;
    trailing.push(0);
    assert!(decode_snapshot(&trailing, hasher()).is_err());
}

#[test]
fn test_fixture_json_round_trip() {
    use crate::snapshot::SnapshotFixture;

    let snap = genesis(3);
    let fixture = SnapshotFixture::from_snapshot(&snap);
    let json = serde_json::to_string_pretty(&fixture).unwrap();
    assert!(json.contains(&block_id(0).to_string()), "identifiers are written in canonical form");

    let parsed: SnapshotFixture = serde_json::from_str(&json).unwrap();
    let rebuilt = parsed.build(hasher()).unwrap();
    assert!(rebuilt.same_as(&snap));
}
