// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::{TRANSACTION_TYPE, VALIDATED_TRANSACTION_TYPE};
use crate::crypto::Signature;
use crate::error::Result;
use crate::types::{Entity, Identifier};

/// Value transfer from `sender` to `receiver`, validated against the
/// snapshot of `reference_block_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub reference_block_id: Identifier,
    pub sender: Identifier,
    pub receiver: Identifier,
    pub amount: u64,
    pub signature: Option<Signature>,
}

#[derive(Serialize)]
struct TransactionBody<'a> {
    reference_block_id: &'a Identifier,
    sender: &'a Identifier,
    receiver: &'a Identifier,
    amount: u64,
}

impl Transaction {
    pub fn new(reference_block_id: Identifier, sender: Identifier, receiver: Identifier, amount: u64) -> Self {
        Self {
            reference_block_id,
            sender,
            receiver,
            amount,
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }
}

impl Entity for Transaction {
    fn type_tag(&self) -> &'static str {
        TRANSACTION_TYPE
    }

    fn identity_bytes(&self) -> Result<Vec<u8>> {
        codec::to_bytes(&TransactionBody {
            reference_block_id: &self.reference_block_id,
            sender: &self.sender,
            receiver: &self.receiver,
            amount: self.amount,
        })
    }
}

/// Transaction together with the signatures of its assigned validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedTransaction {
    pub transaction: Transaction,
    pub certificates: Vec<Signature>,
}

impl ValidatedTransaction {
    pub fn new(transaction: Transaction, certificates: Vec<Signature>) -> Self {
        Self {
            transaction,
            certificates,
        }
    }
}

impl Entity for ValidatedTransaction {
    fn type_tag(&self) -> &'static str {
        VALIDATED_TRANSACTION_TYPE
    }

    fn identity_bytes(&self) -> Result<Vec<u8>> {
        self.transaction.identity_bytes()
    }
}
