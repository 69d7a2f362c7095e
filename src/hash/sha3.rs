// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! SHA3-256 digest.

use ::sha3::{Digest, Sha3_256};

use crate::hash::Hasher;
use crate::types::Identifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha3Hasher;

impl Sha3Hasher {
    fn finish(hasher: Sha3_256) -> Identifier {
        let out = hasher.finalize();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&out);
        Identifier::new(arr)
    }
}

impl Hasher for Sha3Hasher {
    fn algorithm(&self) -> &'static str {
        "sha3-256"
    }

    fn digest_bytes(&self, bytes: &[u8]) -> Identifier {
        let mut h = Sha3_256::new();
        h.update(bytes);
        Self::finish(h)
    }

    fn digest(&self, type_tag: &str, payload: &[u8]) -> Identifier {
        let mut h = Sha3_256::new();
        h.update(type_tag.as_bytes());
        h.update(b":");
        h.update(payload);
        Self::finish(h)
    }
}
