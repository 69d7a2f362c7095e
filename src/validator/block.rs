// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::assignment::ValidatorAssigner;
use crate::config::ProtocolParameters;
use crate::crypto::verify_entity;
use crate::hash::{entity_id, Hasher};
use crate::state::State;
use crate::types::{Block, Identifier, ValidatedTransaction};
use crate::validator::transaction::{RejectReason, TransactionValidator};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRejectReason {
    #[error("block is not well-formed against its previous block")]
    Incorrect,
    #[error("previous block is not the latest finalized block")]
    Inconsistent,
    #[error("block is not signed by its assigned proposer")]
    Unauthenticated,
    #[error("a transaction lacks enough validator signatures")]
    InsufficientSignatures,
    #[error("contained transaction rejected: {0}")]
    InvalidTransaction(RejectReason),
    #[error("transactions overdraw or replay a sender against the previous block")]
    ConflictingTransactions,
}

pub struct BlockValidator {
    state: Arc<dyn State>,
    hasher: Arc<dyn Hasher>,
    assigner: ValidatorAssigner,
    transactions: TransactionValidator,
    params: ProtocolParameters,
}

impl BlockValidator {
    pub fn new(state: Arc<dyn State>, hasher: Arc<dyn Hasher>, params: ProtocolParameters) -> Self {
        let assigner = ValidatorAssigner::new(Arc::clone(&hasher), params.min_stake);
        let transactions = TransactionValidator::new(Arc::clone(&state), Arc::clone(&hasher));
        Self {
            state,
            hasher,
            assigner,
            transactions,
            params,
        }
    }

    pub fn params(&self) -> &ProtocolParameters {
        &self.params
    }

    /// Previous block is finalized, height follows it, the transaction count
    /// is in bounds and no transaction appears twice.
    pub fn is_correct(&self, block: &Block) -> bool {
        let previous = match self.state.snapshot(&block.previous_block_id) {
            Some(s) => s,
            None => return false,
        };
        if block.height != previous.reference_block_height() + 1 {
            return false;
        }
        let count = block.transactions.len();
        if count < self.params.min_transactions_per_block || count > self.params.max_transactions_per_block {
            return false;
        }

        let mut seen = HashSet::with_capacity(count);
        for validated in &block.transactions {
            match entity_id(self.hasher.as_ref(), &validated.transaction) {
                Ok(id) if seen.insert(id) => {}
                _ => return false,
            }
        }
        true
    }

    pub fn is_consistent(&self, block: &Block) -> bool {
        self.state
            .last_finalized_snapshot()
            .map_or(false, |s| s.reference_block_id() == block.previous_block_id)
    }

    /// Proposer is the one assigned for the previous block and its
    /// signature verifies with the proposer as bound signer.
    pub fn is_authenticated(&self, block: &Block) -> bool {
        let signature = match &block.signature {
            Some(sig) if sig.signer == block.proposer => sig,
            _ => return false,
        };
        let previous = match self.state.snapshot(&block.previous_block_id) {
            Some(s) => s,
            None => return false,
        };
        match self.assigner.assign_proposer(&block.previous_block_id, previous.as_ref()) {
            Ok(proposer) if proposer == block.proposer => {}
            _ => return false,
        }
        let key = match previous.get_account(&block.proposer).map(|a| a.public_key.decode()) {
            Some(Ok(key)) => key,
            _ => return false,
        };
        verify_entity(key.as_ref(), self.hasher.as_ref(), block, signature)
    }

    /// Every transaction carries `signature_threshold` valid signatures from
    /// distinct members of its validator assignment.
    pub fn has_enough_validator_signatures(&self, block: &Block) -> bool {
        block
            .transactions
            .iter()
            .all(|validated| self.certified(validated))
    }

    /// Every contained transaction passes the transaction validator against
    /// its own reference block.
    pub fn transactions_valid(&self, block: &Block) -> Result<(), RejectReason> {
        block
            .transactions
            .iter()
            .try_for_each(|validated| self.transactions.validate(&validated.transaction))
    }

    /// Each sender spends at most once per block. Its account in the previous
    /// block must be unchanged since the transaction's reference block and
    /// still cover the amount, so finalizing the block cannot overdraw.
    pub fn is_spendable(&self, block: &Block) -> bool {
        let previous = match self.state.snapshot(&block.previous_block_id) {
            Some(s) => s,
            None => return false,
        };
        let mut senders = HashSet::with_capacity(block.transactions.len());
        block.transactions.iter().all(|validated| {
            let tx = &validated.transaction;
            if !senders.insert(tx.sender) || previous.get_account(&tx.receiver).is_none() {
                return false;
            }
            let sender = match previous.get_account(&tx.sender) {
                Some(a) => a,
                None => return false,
            };
            let reference_height = self
                .state
                .snapshot(&tx.reference_block_id)
                .map(|s| s.reference_block_height());
            let last_height = self
                .state
                .snapshot(&sender.last_block_id)
                .map(|s| s.reference_block_height());
            match (last_height, reference_height) {
                (Some(last), Some(reference)) => last < reference && sender.balance >= tx.amount,
                _ => false,
            }
        })
    }

    pub fn validate(&self, block: &Block) -> Result<(), BlockRejectReason> {
        let verdict = if !self.is_correct(block) {
            Err(BlockRejectReason::Incorrect)
        } else if !self.is_consistent(block) {
            Err(BlockRejectReason::Inconsistent)
        } else if !self.is_authenticated(block) {
            Err(BlockRejectReason::Unauthenticated)
        } else if !self.has_enough_validator_signatures(block) {
            Err(BlockRejectReason::InsufficientSignatures)
        } else if let Err(reason) = self.transactions_valid(block) {
            Err(BlockRejectReason::InvalidTransaction(reason))
        } else if !self.is_spendable(block) {
            Err(BlockRejectReason::ConflictingTransactions)
        } else {
            Ok(())
        };
        debug!(height = block.height, proposer = %block.proposer, ?verdict, "block validated");
        verdict
    }

    fn certified(&self, validated: &ValidatedTransaction) -> bool {
        let tx = &validated.transaction;
        let snapshot = match self.state.snapshot(&tx.reference_block_id) {
            Some(s) => s,
            None => return false,
        };
        let tx_id = match entity_id(self.hasher.as_ref(), tx) {
            Ok(id) => id,
            Err(_) => return false,
        };
        let assignment = match self.assigner.assign_validators(
            &tx_id,
            snapshot.as_ref(),
            self.params.validators_per_entity,
        ) {
            Ok(a) => a,
            Err(_) => return false,
        };

        let mut signers: HashSet<Identifier> = HashSet::new();
        for certificate in &validated.certificates {
            if !assignment.has(&certificate.signer) || signers.contains(&certificate.signer) {
                continue;
            }
            let verified = snapshot
                .get_account(&certificate.signer)
                .and_then(|a| a.public_key.decode().ok())
                .map_or(false, |key| verify_entity(key.as_ref(), self.hasher.as_ref(), tx, certificate));
            if verified {
                signers.insert(certificate.signer);
            }
        }
        signers.len() >= self.params.signature_threshold
    }
}
