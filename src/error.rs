// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Byte input of the wrong length for a fixed-size value.
    #[error("Invalid size: expected {expected} bytes, found {found}")]
    InvalidSize { expected: usize, found: usize },

    /// String input that is not a canonical identifier encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Absent key in an ADS, snapshot or state lookup.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Assignment cannot satisfy the requested count.
    #[error("Insufficient candidates: requested {requested}, available {available}")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("Codec error: {0}")]
    Codec(String),
}

impl KernelError {
    /// True for every malformed-input error (size, encoding, argument).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            KernelError::InvalidSize { .. }
                | KernelError::InvalidEncoding(_)
                | KernelError::InvalidArgument(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, KernelError::NotFound(_))
    }
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
