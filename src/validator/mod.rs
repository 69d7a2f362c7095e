// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Admission predicates for transactions and blocks.
//!
//! Every predicate is read-only and independent of the others, so callers
//! may evaluate them in any order or concurrently. A missing snapshot or
//! account makes a predicate `false`.

pub mod block;
pub mod transaction;

pub use block::{BlockRejectReason, BlockValidator};
pub use transaction::{RejectReason, TransactionValidator};
