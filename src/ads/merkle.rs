// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{KernelError, Result};
use crate::hash::{entity_id, Hasher};
use crate::proof::{AuthenticatedEntity, MembershipProof, ProofStep, Side};
use crate::types::{Entity, Identifier};

/// Merkle tree over entities. Single-threaded; see
/// [`crate::ads::SharedMerkleTree`] for concurrent use.
#[derive(Debug, Clone)]
pub struct MerkleTree<E: Entity> {
    hasher: Arc<dyn Hasher>,
    entries: BTreeMap<Identifier, E>,
    levels: Vec<Vec<Identifier>>,
}

impl<E: Entity> MerkleTree<E> {
    pub fn new(hasher: Arc<dyn Hasher>) -> Self {
        Self {
            hasher,
            entries: BTreeMap::new(),
            levels: vec![Vec::new()],
        }
    }

    /// Inserts `entity` under its identifier, rebuilds, and returns it with
    /// a proof against the new root.
    pub fn put(&mut self, entity: E) -> Result<AuthenticatedEntity<E>> {
        let id = self.identify(&entity)?;
        self.entries.insert(id, entity);
        self.rebuild();
        self.get(&id)
    }

    /// Inserts every entity and rebuilds once. Nothing is inserted if any
    /// entity is malformed.
    pub fn put_all<I: IntoIterator<Item = E>>(&mut self, entities: I) -> Result<()> {
        let mut staged = Vec::new();
        for entity in entities {
            staged.push((self.identify(&entity)?, entity));
        }
        self.entries.extend(staged);
        self.rebuild();
        Ok(())
    }

    pub fn get(&self, id: &Identifier) -> Result<AuthenticatedEntity<E>> {
        let entity = self
            .entries
            .get(id)
            .ok_or_else(|| KernelError::NotFound(format!("entity {}", id)))?;
        Ok(AuthenticatedEntity::new(entity.clone(), self.get_proof(id)?))
    }

    /// Sibling path from the leaf of `id` up to the root.
    pub fn get_proof(&self, id: &Identifier) -> Result<MembershipProof> {
        let mut idx = self.levels[0]
            .binary_search(id)
            .map_err(|_| KernelError::NotFound(format!("entity {}", id)))?;

        let mut path = Vec::with_capacity(self.levels.len().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            let step = if idx % 2 == 0 {
                ProofStep {
                    sibling: *level.get(idx + 1).unwrap_or(&level[idx]),
                    side: Side::Right,
                }
            } else {
                ProofStep {
                    sibling: level[idx - 1],
                    side: Side::Left,
                }
            };
            path.push(step);
            idx /= 2;
        }

        Ok(MembershipProof {
            root: self.root(),
            path,
        })
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.entries.contains_key(id)
    }

    pub fn root(&self) -> Identifier {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Identifier::ZERO)
    }

    /// Canonical serialization of the root for external comparison.
    pub fn root_bytes(&self) -> [u8; 32] {
        self.root().to_bytes()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in identifier order.
    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    pub fn hasher(&self) -> &Arc<dyn Hasher> {
        &self.hasher
    }

    fn identify(&self, entity: &E) -> Result<Identifier> {
        entity_id(self.hasher.as_ref(), entity).map_err(|e| match e {
            KernelError::Codec(msg) => KernelError::InvalidArgument(msg),
            other => other,
        })
    }

    fn rebuild(&mut self) {
        let leaves: Vec<Identifier> = self.entries.keys().copied().collect();
        self.levels = build_levels(self.hasher.as_ref(), leaves);
        tracing::trace!(
            leaves = self.entries.len(),
            depth = self.levels.len() - 1,
            root = %self.root(),
            "merkle tree rebuilt"
        );
    }
}

fn build_levels(hasher: &dyn Hasher, leaves: Vec<Identifier>) -> Vec<Vec<Identifier>> {
    let mut levels = vec![leaves];
    loop {
        let current = &levels[levels.len() - 1];
        if current.len() <= 1 {
            break;
        }
        let next: Vec<Identifier> = current
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                hasher.digest_pair(left, right)
            })
            .collect();
        levels.push(next);
    }
    levels
}
