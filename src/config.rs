// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants and tunable parameters.

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Size in bytes of every identifier.
pub const IDENTIFIER_SIZE: usize = 32;

/// Purpose tag mixed into the seed of validator assignments.
pub const VALIDATOR_TAG: &str = "validator";

/// Purpose tag mixed into the seed of proposer assignments.
pub const PROPOSER_TAG: &str = "block-proposer";

pub const ACCOUNT_TYPE: &str = "account";
pub const TRANSACTION_TYPE: &str = "transaction";
pub const VALIDATED_TRANSACTION_TYPE: &str = "validated-transaction";
pub const BLOCK_TYPE: &str = "block";

/// Parameters every node of a network must agree on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParameters {
    /// Accounts below this stake are never selected as validators or proposers.
    pub min_stake: u64,
    /// Size of the validator assignment of a transaction.
    pub validators_per_entity: usize,
    /// Validator signatures a transaction needs to enter a block.
    pub signature_threshold: usize,
    pub min_transactions_per_block: usize,
    pub max_transactions_per_block: usize,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        Self {
            min_stake: 10,
            validators_per_entity: 10,
            signature_threshold: 6,
            min_transactions_per_block: 0,
            max_transactions_per_block: 100,
        }
    }
}

impl ProtocolParameters {
    pub fn validate(&self) -> Result<()> {
        if self.validators_per_entity == 0 {
            return Err(KernelError::InvalidArgument(
                "validators_per_entity must be positive".into(),
            ));
        }
        if self.signature_threshold == 0 || self.signature_threshold > self.validators_per_entity {
            return Err(KernelError::InvalidArgument(format!(
                "signature_threshold must be in 1..={}, got {}",
                self.validators_per_entity, self.signature_threshold
            )));
        }
        if self.max_transactions_per_block == 0
            || self.min_transactions_per_block > self.max_transactions_per_block
        {
            return Err(KernelError::InvalidArgument(format!(
                "invalid block size bounds [{}, {}]",
                self.min_transactions_per_block, self.max_transactions_per_block
            )));
        }
        Ok(())
    }
}
