// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Entry point for entities arriving from outside the node.

use std::sync::Arc;

use parking_lot::Mutex;

use ledger_kernel::codec::{BincodeCodec, Codec, EncodedEntity};
use ledger_kernel::config::{ProtocolParameters, BLOCK_TYPE, TRANSACTION_TYPE, VALIDATED_TRANSACTION_TYPE};
use ledger_kernel::hash::Hasher;
use ledger_kernel::snapshot::Snapshot;
use ledger_kernel::state::ChainState;
use ledger_kernel::types::{Block, Transaction, ValidatedTransaction};
use ledger_kernel::validator::{BlockRejectReason, BlockValidator, RejectReason, TransactionValidator};

use crate::errors::NodeError;

/// Outcome of processing one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    RejectedTransaction(RejectReason),
    RejectedBlock(BlockRejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

pub trait Engine: Send + Sync {
    fn process(&self, encoded: &EncodedEntity) -> Result<Verdict, NodeError>;
}

/// Dispatches on the type tag and runs the matching validator. Accepted
/// blocks are finalized into the chain state.
pub struct ValidatorEngine {
    codec: BincodeCodec,
    state: Arc<ChainState>,
    hasher: Arc<dyn Hasher>,
    transactions: TransactionValidator,
    blocks: BlockValidator,
    // Held across validate and finalize of a block.
    finalizing: Mutex<()>,
}

impl ValidatorEngine {
    pub fn new(state: Arc<ChainState>, hasher: Arc<dyn Hasher>, params: ProtocolParameters) -> Self {
        Self {
            codec: BincodeCodec,
            transactions: TransactionValidator::new(state.clone(), Arc::clone(&hasher)),
            blocks: BlockValidator::new(state.clone(), Arc::clone(&hasher), params),
            state,
            hasher,
            finalizing: Mutex::new(()),
        }
    }

    pub fn state(&self) -> &Arc<ChainState> {
        &self.state
    }

    fn check_transaction(&self, tx: &Transaction) -> Verdict {
        match self.transactions.validate(tx) {
            Ok(()) => {
                tracing::debug!(sender = %tx.sender, amount = tx.amount, "transaction accepted");
                Verdict::Accepted
            }
            Err(reason) => {
                tracing::warn!(sender = %tx.sender, %reason, "transaction rejected");
                Verdict::RejectedTransaction(reason)
            }
        }
    }
}

impl Engine for ValidatorEngine {
    fn process(&self, encoded: &EncodedEntity) -> Result<Verdict, NodeError> {
        match encoded.type_tag.as_str() {
            TRANSACTION_TYPE => {
                let tx: Transaction = self.codec.decode(encoded, TRANSACTION_TYPE)?;
                Ok(self.check_transaction(&tx))
            }
            VALIDATED_TRANSACTION_TYPE => {
                let validated: ValidatedTransaction = self.codec.decode(encoded, VALIDATED_TRANSACTION_TYPE)?;
                Ok(self.check_transaction(&validated.transaction))
            }
            BLOCK_TYPE => {
                let block: Block = self.codec.decode(encoded, BLOCK_TYPE)?;
                let _guard = self.finalizing.lock();
                match self.blocks.validate(&block) {
                    Ok(()) => {
                        let snapshot = self.state.finalize_block(&block, Arc::clone(&self.hasher))?;
                        tracing::info!(
                            height = block.height,
                            proposer = %block.proposer,
                            block = %snapshot.reference_block_id(),
                            "block accepted and finalized"
                        );
                        Ok(Verdict::Accepted)
                    }
                    Err(reason) => {
                        tracing::warn!(height = block.height, %reason, "block rejected");
                        Ok(Verdict::RejectedBlock(reason))
                    }
                }
            }
            other => Err(NodeError::UnsupportedEntity(other.to_string())),
        }
    }
}
