//! Membership proof structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::hash::Hasher;
use crate::types::Identifier;

/// Paths longer than this cannot come from a real tree (2^64 leaves).
pub const MAX_PROOF_DEPTH: usize = 64;

/// Position of a sibling relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: Identifier,
    pub side: Side,
}

/// Self-contained claim that a leaf belongs to the tree rooted at `root`.
///
/// `path` runs from the leaf up to the root. Verification needs nothing but
/// the leaf, the path and a hasher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    pub root: Identifier,
    pub path: Vec<ProofStep>,
}

impl MembershipProof {
    /// Folds the path over `leaf` and returns the resulting root.
    pub fn compute_root(&self, hasher: &dyn Hasher, leaf: &Identifier) -> Identifier {
        self.path.iter().fold(*leaf, |node, step| match step.side {
            Side::Right => hasher.digest_pair(&node, &step.sibling),
            Side::Left => hasher.digest_pair(&step.sibling, &node),
        })
    }
}

/// An entity carrying a proof of its membership in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedEntity<E> {
    pub entity: E,
    pub proof: MembershipProof,
}

impl<E> AuthenticatedEntity<E> {
    pub fn new(entity: E, proof: MembershipProof) -> Self {
        Self { entity, proof }
    }

    pub fn root(&self) -> &Identifier {
        &self.proof.root
    }
}
