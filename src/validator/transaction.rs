// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::crypto::verify_entity;
use crate::hash::Hasher;
use crate::state::State;
use crate::types::{Account, Transaction};

/// First predicate a transaction failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("transaction is not well-formed against its reference block")]
    Incorrect,
    #[error("reference block does not follow the sender's last recorded block")]
    Unsound,
    #[error("signature does not verify under the sender's key")]
    Unauthenticated,
    #[error("sender balance is below the transfer amount")]
    InsufficientBalance,
}

pub struct TransactionValidator {
    state: Arc<dyn State>,
    hasher: Arc<dyn Hasher>,
}

impl TransactionValidator {
    pub fn new(state: Arc<dyn State>, hasher: Arc<dyn Hasher>) -> Self {
        Self { state, hasher }
    }

    /// Reference block is finalized, both parties exist in its snapshot and
    /// the amount is positive.
    pub fn is_correct(&self, tx: &Transaction) -> bool {
        let snapshot = match self.state.snapshot(&tx.reference_block_id) {
            Some(s) => s,
            None => return false,
        };
        snapshot.get_account(&tx.sender).is_some()
            && snapshot.get_account(&tx.receiver).is_some()
            && tx.amount > 0
    }

    /// The reference block is strictly higher than the block the sender's
    /// account was last recorded at.
    pub fn is_sound(&self, tx: &Transaction) -> bool {
        let reference = match self.state.snapshot(&tx.reference_block_id) {
            Some(s) => s,
            None => return false,
        };
        let last_block_id = match reference.get_account(&tx.sender) {
            Some(sender) => sender.last_block_id,
            None => return false,
        };
        match self.state.snapshot(&last_block_id) {
            Some(last) => last.reference_block_height() < reference.reference_block_height(),
            None => false,
        }
    }

    /// Signed by the sender, and the signature verifies under the sender's
    /// key as of the reference snapshot.
    pub fn is_authenticated(&self, tx: &Transaction) -> bool {
        let signature = match &tx.signature {
            Some(sig) if sig.signer == tx.sender => sig,
            _ => return false,
        };
        let snapshot = match self.state.snapshot(&tx.reference_block_id) {
            Some(s) => s,
            None => return false,
        };
        let key = match snapshot.get_account(&tx.sender).map(|a| a.public_key.decode()) {
            Some(Ok(key)) => key,
            _ => return false,
        };
        verify_entity(key.as_ref(), self.hasher.as_ref(), tx, signature)
    }

    pub fn sender_has_enough_balance(&self, tx: &Transaction) -> bool {
        self.with_sender(tx, |sender| sender.balance >= tx.amount)
            .unwrap_or(false)
    }

    /// Runs every predicate and reports the first failure.
    pub fn validate(&self, tx: &Transaction) -> Result<(), RejectReason> {
        let verdict = if !self.is_correct(tx) {
            Err(RejectReason::Incorrect)
        } else if !self.is_sound(tx) {
            Err(RejectReason::Unsound)
        } else if !self.is_authenticated(tx) {
            Err(RejectReason::Unauthenticated)
        } else if !self.sender_has_enough_balance(tx) {
            Err(RejectReason::InsufficientBalance)
        } else {
            Ok(())
        };
        debug!(sender = %tx.sender, amount = tx.amount, ?verdict, "transaction validated");
        verdict
    }

    fn with_sender<T>(&self, tx: &Transaction, f: impl FnOnce(&Account) -> T) -> Option<T> {
        let snapshot = self.state.snapshot(&tx.reference_block_id)?;
        snapshot.get_account(&tx.sender).map(f)
    }
}
