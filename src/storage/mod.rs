// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Block storage boundary.

use crate::error::Result;
use crate::types::{Block, Identifier};

pub mod memory;

pub use memory::MemoryBlockStore;

/// Key-value store over blocks, keyed by block identifier.
pub trait BlockStore: Send + Sync {
    fn has(&self, id: &Identifier) -> bool;

    /// Returns `false` when a block with the same identifier is present.
    fn add(&self, block: Block) -> Result<bool>;

    /// Returns `false` when no such block is present.
    fn remove(&self, id: &Identifier) -> bool;

    fn by_id(&self, id: &Identifier) -> Option<Block>;

    /// Every stored block at `height`, in identifier order.
    fn at_height(&self, height: u64) -> Vec<Block>;

    /// Every stored block, by height then identifier.
    fn all(&self) -> Vec<Block>;
}
