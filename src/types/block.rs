// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::BLOCK_TYPE;
use crate::crypto::Signature;
use crate::error::Result;
use crate::types::{Entity, Identifier, ValidatedTransaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub previous_block_id: Identifier,
    pub proposer: Identifier,
    pub height: u64,
    pub transactions: Vec<ValidatedTransaction>,
    pub signature: Option<Signature>,
}

#[derive(Serialize)]
struct BlockBody<'a> {
    previous_block_id: &'a Identifier,
    proposer: &'a Identifier,
    height: u64,
    transactions: &'a [ValidatedTransaction],
}

impl Block {
    pub fn new(
        previous_block_id: Identifier,
        proposer: Identifier,
        height: u64,
        transactions: Vec<ValidatedTransaction>,
    ) -> Self {
        Self {
            previous_block_id,
            proposer,
            height,
            transactions,
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }
}

impl Entity for Block {
    fn type_tag(&self) -> &'static str {
        BLOCK_TYPE
    }

    fn identity_bytes(&self) -> Result<Vec<u8>> {
        codec::to_bytes(&BlockBody {
            previous_block_id: &self.previous_block_id,
            proposer: &self.proposer,
            height: self.height,
            transactions: &self.transactions,
        })
    }
}
