// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Identity types.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::IDENTIFIER_SIZE;
use crate::error::{KernelError, Result};

/// Multibase prefix of base58btc.
const BASE58_PREFIX: char = 'z';

/// Fixed-size opaque key naming every entity.
///
/// Ordering is the unsigned byte-wise order, most significant byte first,
/// which is exactly the derived array order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Identifier([u8; IDENTIFIER_SIZE]);

impl Identifier {
    pub const ZERO: Identifier = Identifier([0u8; IDENTIFIER_SIZE]);

    pub const fn new(bytes: [u8; IDENTIFIER_SIZE]) -> Self {
        Identifier(bytes)
    }

    /// Fails with `InvalidSize` unless `bytes` is exactly 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; IDENTIFIER_SIZE] = bytes.try_into().map_err(|_| KernelError::InvalidSize {
            expected: IDENTIFIER_SIZE,
            found: bytes.len(),
        })?;
        Ok(Identifier(arr))
    }

    pub fn bytes(&self) -> &[u8; IDENTIFIER_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; IDENTIFIER_SIZE] {
        self.0
    }

    /// Three-way comparison: negative, zero or positive.
    pub fn compare(&self, other: &Identifier) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Parses the canonical multibase base58 form.
    pub fn from_string(s: &str) -> Result<Self> {
        let body = s.strip_prefix(BASE58_PREFIX).ok_or_else(|| {
            KernelError::InvalidEncoding(format!("missing '{}' multibase prefix", BASE58_PREFIX))
        })?;
        let decoded = bs58::decode(body)
            .into_vec()
            .map_err(|e| KernelError::InvalidEncoding(e.to_string()))?;
        if decoded.len() != IDENTIFIER_SIZE {
            return Err(KernelError::InvalidEncoding(format!(
                "decoded {} bytes, expected {}",
                decoded.len(),
                IDENTIFIER_SIZE
            )));
        }
        Identifier::from_bytes(&decoded)
    }

    fn short(&self) -> String {
        let full = self.to_string();
        full.chars().take(10).collect()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", BASE58_PREFIX, bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({}..)", self.short())
    }
}

impl FromStr for Identifier {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        Identifier::from_string(s)
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; IDENTIFIER_SIZE]> for Identifier {
    fn from(bytes: [u8; IDENTIFIER_SIZE]) -> Self {
        Identifier(bytes)
    }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = KernelError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Identifier::from_bytes(bytes)
    }
}

// Base58 strings for JSON fixtures, raw bytes for the binary codec.
impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Identifier::from_string(&s).map_err(D::Error::custom)
        } else {
            let bytes = <[u8; IDENTIFIER_SIZE]>::deserialize(deserializer)?;
            Ok(Identifier(bytes))
        }
    }
}
