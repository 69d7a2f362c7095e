// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Validator and proposer assignment.
//!
//! Selection is a pure function of `(id, tag, snapshot, num)` and must be
//! replayable by every node.
//!
//! ```text
//! seed      = H(id || tag)
//! target_i  = H(seed || be_u64(i))        i = 1..=num
//! pick_i    = max { a in pool : a <= target_i }, else max(pool)
//! pool     -= pick_i
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{PROPOSER_TAG, VALIDATOR_TAG};
use crate::error::{KernelError, Result};
use crate::hash::Hasher;
use crate::snapshot::Snapshot;
use crate::types::Identifier;

/// Ordered, duplicate-free selection of accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    members: Vec<Identifier>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: Identifier) -> Result<()> {
        if self.has(&id) {
            return Err(KernelError::InvalidArgument(format!(
                "{} already assigned",
                id
            )));
        }
        self.members.push(id);
        Ok(())
    }

    pub fn has(&self, id: &Identifier) -> bool {
        self.members.contains(id)
    }

    /// Members in selection order.
    pub fn all(&self) -> &[Identifier] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ValidatorAssigner {
    hasher: Arc<dyn Hasher>,
    min_stake: u64,
}

impl ValidatorAssigner {
    pub fn new(hasher: Arc<dyn Hasher>, min_stake: u64) -> Self {
        Self { hasher, min_stake }
    }

    pub fn min_stake(&self) -> u64 {
        self.min_stake
    }

    /// Selects `num` distinct stake-eligible accounts of `snapshot` for `id`.
    ///
    /// Fails with `InvalidArgument` for `num == 0` and with
    /// `InsufficientCandidates` when fewer than `num` accounts are eligible.
    /// Both are detected before any selection.
    pub fn assign(&self, id: &Identifier, tag: &str, snapshot: &dyn Snapshot, num: usize) -> Result<Assignment> {
        if num == 0 {
            return Err(KernelError::InvalidArgument(
                "assignment size must be positive".into(),
            ));
        }

        let mut pool: BTreeSet<Identifier> = snapshot
            .all()
            .into_iter()
            .filter(|a| a.is_stake_eligible(self.min_stake))
            .map(|a| a.identifier)
            .collect();

        if num > pool.len() {
            return Err(KernelError::InsufficientCandidates {
                requested: num,
                available: pool.len(),
            });
        }

        let seed = self.seed(id, tag);
        debug!(entity = %id, tag, seed = %seed, num, eligible = pool.len(), "assigning");

        let mut assignment = Assignment::new();
        for i in 1..=num as u64 {
            let target = self.target(&seed, i);
            let pick = pool
                .range(..=target)
                .next_back()
                .or_else(|| pool.iter().next_back())
                .copied()
                .ok_or(KernelError::InsufficientCandidates {
                    requested: num,
                    available: assignment.len(),
                })?;
            pool.remove(&pick);
            assignment.add(pick)?;
            debug!(round = i, target = %target, pick = %pick, "selected");
        }
        Ok(assignment)
    }

    pub fn assign_validators(&self, id: &Identifier, snapshot: &dyn Snapshot, num: usize) -> Result<Assignment> {
        self.assign(id, VALIDATOR_TAG, snapshot, num)
    }

    /// Proposer of the block that follows `block_id`.
    pub fn assign_proposer(&self, block_id: &Identifier, snapshot: &dyn Snapshot) -> Result<Identifier> {
        let assignment = self.assign(block_id, PROPOSER_TAG, snapshot, 1)?;
        assignment
            .all()
            .first()
            .copied()
            .ok_or_else(|| KernelError::NotFound(format!("proposer for {}", block_id)))
    }

    fn seed(&self, id: &Identifier, tag: &str) -> Identifier {
        let mut buf = Vec::with_capacity(32 + tag.len());
        buf.extend_from_slice(id.bytes());
        buf.extend_from_slice(tag.as_bytes());
        self.hasher.digest_bytes(&buf)
    }

    fn target(&self, seed: &Identifier, round: u64) -> Identifier {
        let mut buf = [0u8; 40];
        buf[..32].copy_from_slice(seed.bytes());
        BigEndian::write_u64(&mut buf[32..], round);
        self.hasher.digest_bytes(&buf)
    }
}
