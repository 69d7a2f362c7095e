// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::config::ACCOUNT_TYPE;
use crate::crypto::EncodedPublicKey;
use crate::types::{Entity, Identifier};

/// Account as recorded in one snapshot. Never mutated in place; a new
/// snapshot carries the new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub identifier: Identifier,
    pub stake: u64,
    pub public_key: EncodedPublicKey,
    /// Last block this account's state was recorded at.
    pub last_block_id: Identifier,
    pub balance: u64,
}

impl Account {
    pub fn new(
        identifier: Identifier,
        public_key: EncodedPublicKey,
        last_block_id: Identifier,
        stake: u64,
        balance: u64,
    ) -> Self {
        Self {
            identifier,
            stake,
            public_key,
            last_block_id,
            balance,
        }
    }

    pub fn is_stake_eligible(&self, min_stake: u64) -> bool {
        self.stake >= min_stake
    }
}

impl Entity for Account {
    fn type_tag(&self) -> &'static str {
        ACCOUNT_TYPE
    }
}
