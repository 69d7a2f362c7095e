//! Membership proof verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use crate::hash::{entity_id, Hasher};
use crate::proof::{AuthenticatedEntity, MAX_PROOF_DEPTH};
use crate::types::{Entity, Identifier};

pub trait AuthenticatedEntityVerifier<E: Entity> {
    /// True iff the entity's own hash folded through the proof path yields
    /// the proof's stated root.
    fn verify(&self, authenticated: &AuthenticatedEntity<E>) -> bool;

    /// As `verify`, and the stated root must be `expected_root`.
    fn verify_against(&self, authenticated: &AuthenticatedEntity<E>, expected_root: &Identifier) -> bool {
        authenticated.proof.root == *expected_root && self.verify(authenticated)
    }
}

/// Verifies proofs issued by [`crate::ads::MerkleTree`] without access to
/// the tree.
#[derive(Debug, Clone)]
pub struct MerkleVerifier {
    hasher: Arc<dyn Hasher>,
}

impl MerkleVerifier {
    pub fn new(hasher: Arc<dyn Hasher>) -> Self {
        Self { hasher }
    }
}

impl<E: Entity> AuthenticatedEntityVerifier<E> for MerkleVerifier {
    fn verify(&self, authenticated: &AuthenticatedEntity<E>) -> bool {
        if authenticated.proof.path.len() > MAX_PROOF_DEPTH {
            return false;
        }
        let leaf = match entity_id(self.hasher.as_ref(), &authenticated.entity) {
            Ok(id) => id,
            Err(_) => return false,
        };
        authenticated.proof.compute_root(self.hasher.as_ref(), &leaf) == authenticated.proof.root
    }
}
