// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Single-writer, multi-reader tree.
//!
//! Readers clone the `Arc` of the last published tree and work on it without
//! holding any lock. A writer copies the published tree, applies its change,
//! and swaps the new tree in; the new root is never visible half-built.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::ads::MerkleTree;
use crate::error::Result;
use crate::hash::Hasher;
use crate::proof::{AuthenticatedEntity, MembershipProof};
use crate::types::{Entity, Identifier};

pub struct SharedMerkleTree<E: Entity> {
    published: RwLock<Arc<MerkleTree<E>>>,
    writer: Mutex<()>,
}

impl<E: Entity> SharedMerkleTree<E> {
    pub fn new(hasher: Arc<dyn Hasher>) -> Self {
        Self::from_tree(MerkleTree::new(hasher))
    }

    pub fn from_tree(tree: MerkleTree<E>) -> Self {
        Self {
            published: RwLock::new(Arc::new(tree)),
            writer: Mutex::new(()),
        }
    }

    /// The last fully built tree.
    pub fn view(&self) -> Arc<MerkleTree<E>> {
        self.published.read().clone()
    }

    pub fn put(&self, entity: E) -> Result<AuthenticatedEntity<E>> {
        let _writer = self.writer.lock();
        let mut next = (*self.view()).clone();
        let authenticated = next.put(entity)?;
        *self.published.write() = Arc::new(next);
        Ok(authenticated)
    }

    pub fn get(&self, id: &Identifier) -> Result<AuthenticatedEntity<E>> {
        self.view().get(id)
    }

    pub fn get_proof(&self, id: &Identifier) -> Result<MembershipProof> {
        self.view().get_proof(id)
    }

    pub fn root(&self) -> Identifier {
        self.view().root()
    }

    pub fn size(&self) -> usize {
        self.view().size()
    }
}
