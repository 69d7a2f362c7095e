// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Entity encoding.
//!
//! The codec turns an entity into the byte payload that is digested and
//! shipped. Encoding uses bincode's standard configuration through the
//! serde path, which is byte-identical across architectures.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::types::Entity;

/// Encoded payload together with the logical kind of the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedEntity {
    pub bytes: Vec<u8>,
    pub type_tag: String,
}

pub trait Codec: Send + Sync {
    fn encode<E: Entity>(&self, entity: &E) -> Result<EncodedEntity>;

    /// Fails with `InvalidArgument` when `encoded` carries another type tag.
    fn decode<E: Entity>(&self, encoded: &EncodedEntity, expected_tag: &str) -> Result<E>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn encode<E: Entity>(&self, entity: &E) -> Result<EncodedEntity> {
        Ok(EncodedEntity {
            bytes: to_bytes(entity)?,
            type_tag: entity.type_tag().to_string(),
        })
    }

    fn decode<E: Entity>(&self, encoded: &EncodedEntity, expected_tag: &str) -> Result<E> {
        if encoded.type_tag != expected_tag {
            return Err(KernelError::InvalidArgument(format!(
                "type tag mismatch: expected {:?}, got {:?}",
                expected_tag, encoded.type_tag
            )));
        }
        from_bytes(&encoded.bytes)
    }
}

/// Canonical bytes of any serializable value.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| KernelError::Codec(e.to_string()))
}

pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, read) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| KernelError::Codec(e.to_string()))?;
    if read != bytes.len() {
        return Err(KernelError::Codec(format!(
            "trailing bytes: consumed {} of {}",
            read,
            bytes.len()
        )));
    }
    Ok(value)
}
