// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Digest capability.
//!
//! Consumers hold a `dyn Hasher` and never name the algorithm, so the
//! digest can be swapped without touching them. All variants produce
//! 256-bit outputs that convert directly into an [`Identifier`].
//!
//! # Input framing
//! ```text
//! digest(tag, payload)  = H(tag || ':' || payload)
//! digest_pair(l, r)     = H(l[0..32] || r[0..32])
//! digest_bytes(b)       = H(b)
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{KernelError, Result};
use crate::types::{Entity, Identifier};

pub mod blake3;
pub mod sha3;

pub use self::blake3::Blake3Hasher;
pub use self::sha3::Sha3Hasher;

pub trait Hasher: Send + Sync + fmt::Debug {
    fn algorithm(&self) -> &'static str;

    fn digest_bytes(&self, bytes: &[u8]) -> Identifier;

    /// Digest of an encoded entity payload under its type tag.
    fn digest(&self, type_tag: &str, payload: &[u8]) -> Identifier {
        let mut buf = Vec::with_capacity(type_tag.len() + 1 + payload.len());
        buf.extend_from_slice(type_tag.as_bytes());
        buf.push(b':');
        buf.extend_from_slice(payload);
        self.digest_bytes(&buf)
    }

    /// Internal Merkle node: digest of `left || right`.
    fn digest_pair(&self, left: &Identifier, right: &Identifier) -> Identifier {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(left.bytes());
        buf[32..].copy_from_slice(right.bytes());
        self.digest_bytes(&buf)
    }
}

/// The network's default digest.
pub fn default_hasher() -> Arc<dyn Hasher> {
    Arc::new(Blake3Hasher)
}

/// Identifier of an entity: its tagged digest.
pub fn entity_id<E: Entity>(hasher: &dyn Hasher, entity: &E) -> Result<Identifier> {
    let payload = entity.identity_bytes()?;
    if payload.is_empty() {
        return Err(KernelError::InvalidArgument(format!(
            "empty {} payload",
            entity.type_tag()
        )));
    }
    Ok(hasher.digest(entity.type_tag(), &payload))
}
