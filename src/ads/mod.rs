// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Authenticated data structure.
//!
//! A key-value store of entities keyed by their identifier that hands out
//! membership proofs against its current root.
//!
//! # Tree shape
//! ```text
//! level 0: leaf identifiers, ascending
//! level k: digest_pair(left, right) over level k-1
//!          an odd level pairs its last node with itself
//! root:    the single node of the top level
//!          (ZERO for an empty tree, the leaf itself for one entity)
//! ```

pub mod merkle;
pub mod shared;

pub use merkle::MerkleTree;
pub use shared::SharedMerkleTree;
