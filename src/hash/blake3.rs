// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! BLAKE3 digest, the default identifier hash.

use crate::hash::Hasher;
use crate::types::Identifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn algorithm(&self) -> &'static str {
        "blake3"
    }

    fn digest_bytes(&self, bytes: &[u8]) -> Identifier {
        Identifier::new(*::blake3::hash(bytes).as_bytes())
    }

    fn digest(&self, type_tag: &str, payload: &[u8]) -> Identifier {
        let mut hasher = ::blake3::Hasher::new();
        hasher.update(type_tag.as_bytes());
        hasher.update(b":");
        hasher.update(payload);
        Identifier::new(*hasher.finalize().as_bytes())
    }

    fn digest_pair(&self, left: &Identifier, right: &Identifier) -> Identifier {
        let mut hasher = ::blake3::Hasher::new();
        hasher.update(left.bytes());
        hasher.update(right.bytes());
        Identifier::new(*hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_determinism() {
        let a = Blake3Hasher.digest("transaction", b"payload");
        let b = Blake3Hasher.digest("transaction", b"payload");
        assert_eq!(a, b, "Same bytes and tag must hash identically");
    }

    #[test]
    fn test_streaming_matches_framing() {
        let streamed = Blake3Hasher.digest("block", b"abc");
        let framed = Blake3Hasher.digest_bytes(b"block:abc");
        assert_eq!(streamed, framed);
    }

    #[test]
    fn test_tag_separates_digests() {
        let tx = Blake3Hasher.digest("transaction", b"same");
        let block = Blake3Hasher.digest("block", b"same");
        assert_ne!(tx, block);
    }
}
