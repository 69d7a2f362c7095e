// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! ledger-kernel: validation core of a permissioned, stake-weighted ledger.
//!
//! Identifiers, digests, signatures, a Merkle-backed account store, the
//! deterministic validator and proposer assignment, and the admission
//! predicates for transactions and blocks. Everything here is synchronous
//! and performs no I/O.

pub mod config;
pub mod error;
pub mod codec;
pub mod types;
pub mod hash;
pub mod crypto;
pub mod proof;
pub mod verify;
pub mod ads;
pub mod snapshot;
pub mod state;
pub mod assignment;
pub mod validator;
pub mod storage;

pub use error::{KernelError, Result};
pub use types::{Account, Block, Entity, Identifier, Transaction, ValidatedTransaction};

#[cfg(test)]
pub mod tests;
