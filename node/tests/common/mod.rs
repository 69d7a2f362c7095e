// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![allow(dead_code)]
use std::sync::Arc;

use ledger_kernel::crypto::{sign_entity, Ed25519PrivateKey, PrivateKey};
use ledger_kernel::hash::{default_hasher, Hasher};
use ledger_kernel::snapshot::{AccountSnapshot, SnapshotBuilder};
use ledger_kernel::state::ChainState;
use ledger_kernel::types::{Account, Identifier, Transaction};

pub fn hasher() -> Arc<dyn Hasher> {
    default_hasher()
}

pub fn id(n: u8) -> Identifier {
    hasher().digest_bytes(&[b'a', n])
}

pub fn block_id(n: u8) -> Identifier {
    hasher().digest_bytes(&[b'b', n])
}

pub fn key(n: u8) -> Ed25519PrivateKey {
    Ed25519PrivateKey::from_seed(id(n), [n; 32])
}

pub fn genesis(accounts: u8) -> AccountSnapshot {
    let mut builder = SnapshotBuilder::new(block_id(0), 0);
    for i in 0..accounts {
        let account = Account::new(id(i), key(i).public_key().encode(), block_id(0), 20, 100);
        builder.add_account(account).unwrap();
    }
    builder.build(hasher()).unwrap()
}

/// Genesis at height 0 plus an empty block 1 on top of it.
pub fn two_block_state(accounts: u8) -> ChainState {
    let g = genesis(accounts);
    let next = g.successor(block_id(1), 1).build(hasher()).unwrap();
    let state = ChainState::with_genesis(g).unwrap();
    state.add_snapshot(next).unwrap();
    state
}

pub fn transfer(reference: Identifier, from: u8, to: u8, amount: u64) -> Transaction {
    let tx = Transaction::new(reference, id(from), id(to), amount);
    let sig = sign_entity(&key(from), hasher().as_ref(), &tx).unwrap();
    tx.with_signature(sig)
}
