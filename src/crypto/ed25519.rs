// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ed25519 signing.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::crypto::{
    signed_message, EncodedPublicKey, KeyGenerator, PrivateKey, PublicKey, Signature, SignatureAlgorithm,
};
use crate::error::{KernelError, Result};
use crate::types::Identifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyGenerator;

impl KeyGenerator for Ed25519KeyGenerator {
    fn generate(&self, owner: Identifier) -> Box<dyn PrivateKey> {
        Box::new(Ed25519PrivateKey {
            owner,
            key: SigningKey::generate(&mut OsRng),
        })
    }
}

pub struct Ed25519PrivateKey {
    owner: Identifier,
    key: SigningKey,
}

impl Ed25519PrivateKey {
    /// Deterministic key from a 32-byte seed.
    pub fn from_seed(owner: Identifier, seed: [u8; 32]) -> Self {
        Self {
            owner,
            key: SigningKey::from_bytes(&seed),
        }
    }
}

impl PrivateKey for Ed25519PrivateKey {
    fn owner(&self) -> Identifier {
        self.owner
    }

    fn public_key(&self) -> Box<dyn PublicKey> {
        Box::new(Ed25519PublicKey(self.key.verifying_key()))
    }

    fn sign_digest(&self, digest: &Identifier) -> Signature {
        let sig = self.key.sign(&signed_message(digest, &self.owner));
        Signature {
            signer: self.owner,
            algorithm: SignatureAlgorithm::Ed25519,
            bytes: sig.to_bytes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| KernelError::InvalidSize {
            expected: 32,
            found: bytes.len(),
        })?;
        Ok(Self(VerifyingKey::from_bytes(&arr)?))
    }
}

impl PublicKey for Ed25519PublicKey {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Ed25519
    }

    fn encode(&self) -> EncodedPublicKey {
        EncodedPublicKey {
            algorithm: SignatureAlgorithm::Ed25519,
            bytes: self.0.to_bytes().to_vec(),
        }
    }

    fn verify_digest(&self, digest: &Identifier, signature: &Signature) -> bool {
        if signature.algorithm != SignatureAlgorithm::Ed25519 {
            return false;
        }
        let sig = match ed25519_dalek::Signature::from_slice(&signature.bytes) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        self.0
            .verify(&signed_message(digest, &signature.signer), &sig)
            .is_ok()
    }
}
