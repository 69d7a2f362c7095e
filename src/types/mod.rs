// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::error::Result;

pub mod account;
pub mod block;
pub mod id;
pub mod transaction;

pub use account::Account;
pub use block::Block;
pub use id::Identifier;
pub use transaction::{Transaction, ValidatedTransaction};

/// Anything that is identified by its hash.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Logical kind, mixed into the digest.
    fn type_tag(&self) -> &'static str;

    /// Bytes the identifier is computed over. Signed entities leave their
    /// signatures out so signing does not change the identifier.
    fn identity_bytes(&self) -> Result<Vec<u8>> {
        codec::to_bytes(self)
    }
}
