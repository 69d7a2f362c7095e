// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signing capability.
//!
//! Signatures are computed over an entity digest followed by the signer's
//! identifier, so a signature is bound to both the entity and its author:
//!
//! ```text
//! message = entity_id[0..32] || signer[0..32]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::hash::{entity_id, Hasher};
use crate::types::{Entity, Identifier};

pub mod ed25519;

pub use self::ed25519::{Ed25519KeyGenerator, Ed25519PrivateKey, Ed25519PublicKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    Ed25519,
}

/// Public key in transportable form, as stored in an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPublicKey {
    pub algorithm: SignatureAlgorithm,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Identifier of the signing account.
    pub signer: Identifier,
    pub algorithm: SignatureAlgorithm,
    pub bytes: Vec<u8>,
}

pub trait PublicKey: Send + Sync + fmt::Debug {
    fn algorithm(&self) -> SignatureAlgorithm;

    fn encode(&self) -> EncodedPublicKey;

    /// True only for a signature produced by the matching private key over
    /// exactly `digest` and the signature's bound signer.
    fn verify_digest(&self, digest: &Identifier, signature: &Signature) -> bool;
}

pub trait PrivateKey: Send + Sync {
    /// Account this key signs for.
    fn owner(&self) -> Identifier;

    fn public_key(&self) -> Box<dyn PublicKey>;

    fn sign_digest(&self, digest: &Identifier) -> Signature;
}

pub trait KeyGenerator: Send + Sync {
    fn generate(&self, owner: Identifier) -> Box<dyn PrivateKey>;
}

pub(crate) fn signed_message(digest: &Identifier, signer: &Identifier) -> [u8; 64] {
    let mut msg = [0u8; 64];
    msg[..32].copy_from_slice(digest.bytes());
    msg[32..].copy_from_slice(signer.bytes());
    msg
}

pub fn sign_entity<E: Entity>(key: &dyn PrivateKey, hasher: &dyn Hasher, entity: &E) -> Result<Signature> {
    let digest = entity_id(hasher, entity)?;
    Ok(key.sign_digest(&digest))
}

/// Pure check of `signature` over `entity`. Encoding failures count as a
/// failed verification.
pub fn verify_entity<E: Entity>(
    key: &dyn PublicKey,
    hasher: &dyn Hasher,
    entity: &E,
    signature: &Signature,
) -> bool {
    if signature.algorithm != key.algorithm() {
        return false;
    }
    match entity_id(hasher, entity) {
        Ok(digest) => key.verify_digest(&digest, signature),
        Err(_) => false,
    }
}

pub fn decode_public_key(encoded: &EncodedPublicKey) -> Result<Box<dyn PublicKey>> {
    match encoded.algorithm {
        SignatureAlgorithm::Ed25519 => Ok(Box::new(Ed25519PublicKey::from_bytes(&encoded.bytes)?)),
    }
}

impl EncodedPublicKey {
    pub fn decode(&self) -> Result<Box<dyn PublicKey>> {
        decode_public_key(self)
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Ed25519 => f.write_str("ed25519"),
        }
    }
}

impl From<ed25519_dalek::SignatureError> for KernelError {
    fn from(e: ed25519_dalek::SignatureError) -> Self {
        KernelError::InvalidArgument(format!("malformed key material: {}", e))
    }
}
