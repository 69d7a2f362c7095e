// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;

use ledger_kernel::config::{PROPOSER_TAG, VALIDATOR_TAG};
use ledger_kernel::crypto::{Ed25519PrivateKey, PrivateKey};
use ledger_kernel::hash::{default_hasher, Hasher};
use ledger_kernel::snapshot::SnapshotFixture;
use ledger_kernel::types::{Account, Identifier};
use ledger_verify::{assign_report, load_snapshot, pack, prove_report, root_report};
use tempfile::{tempdir, TempDir};

fn id(n: u8) -> Identifier {
    default_hasher().digest_bytes(&[b'a', n])
}

fn fixture() -> SnapshotFixture {
    let block = default_hasher().digest_bytes(b"genesis");
    let accounts = (0..8u8)
        .map(|i| {
            let key = Ed25519PrivateKey::from_seed(id(i), [i; 32]);
            Account::new(id(i), key.public_key().encode(), block, 5 + i as u64 * 2, 1_000)
        })
        .collect();
    SnapshotFixture {
        reference_block_id: block,
        reference_block_height: 0,
        accounts,
    }
}

fn write_fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, serde_json::to_string_pretty(&fixture()).unwrap()).unwrap();
    (dir, path)
}

#[test]
fn test_root_matches_direct_build() {
    let (_dir, path) = write_fixture();
    let snap = load_snapshot(&path, default_hasher()).unwrap();
    let expected = fixture().build(default_hasher()).unwrap();

    let report = root_report(&snap);
    assert_eq!(report.accounts, 8);
    assert_eq!(report.accounts_root, expected.accounts_root());
}

#[test]
fn test_assignment_is_replayable() {
    let (_dir, path) = write_fixture();
    let snap = load_snapshot(&path, default_hasher()).unwrap();
    let entity = id(200);

    let first = assign_report(&snap, default_hasher(), entity, VALIDATOR_TAG, 4, 10).unwrap();
    let second = assign_report(&snap, default_hasher(), entity, VALIDATOR_TAG, 4, 10).unwrap();
    assert_eq!(first.members, second.members);
    assert_eq!(first.members.len(), 4);

    // stakes are 5,7,9,... so only accounts 3..8 reach 10
    let eligible: Vec<Identifier> = (3..8).map(id).collect();
    assert!(first.members.iter().all(|m| eligible.contains(m)));

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["members"].as_array().unwrap().len(), 4);
    assert_eq!(json["entity"], serde_json::Value::String(entity.to_string()));
}

#[test]
fn test_assignment_over_eligible_fails() {
    let (_dir, path) = write_fixture();
    let snap = load_snapshot(&path, default_hasher()).unwrap();
    assert!(assign_report(&snap, default_hasher(), id(1), PROPOSER_TAG, 6, 10).is_err());
    assert!(assign_report(&snap, default_hasher(), id(1), PROPOSER_TAG, 1, 10).is_ok());
}

#[test]
fn test_prove_known_and_unknown_account() {
    let (_dir, path) = write_fixture();
    let snap = load_snapshot(&path, default_hasher()).unwrap();

    let report = prove_report(&snap, default_hasher(), &id(2)).unwrap();
    assert!(report.verified);
    assert_eq!(report.authenticated.entity.identifier, id(2));

    assert!(prove_report(&snap, default_hasher(), &id(99)).is_err());
}

#[test]
fn test_packed_container_loads_back() {
    let (dir, path) = write_fixture();
    let snap = load_snapshot(&path, default_hasher()).unwrap();

    let out = dir.path().join("snapshot.bin");
    let written = pack(&snap, &out).unwrap();
    assert!(written > 0);

    let restored = load_snapshot(&out, default_hasher()).unwrap();
    assert_eq!(root_report(&restored).accounts_root, snap.accounts_root());
}

#[test]
fn test_duplicate_accounts_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dup.json");
    let mut f = fixture();
    let first = f.accounts[0].clone();
    f.accounts.push(first);
    std::fs::write(&path, serde_json::to_string(&f).unwrap()).unwrap();
    assert!(load_snapshot(&path, default_hasher()).is_err());
}
