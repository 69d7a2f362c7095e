// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::hash::{entity_id, Hasher};
use crate::storage::BlockStore;
use crate::types::{Block, Identifier};

#[derive(Default)]
struct Inner {
    blocks: FxHashMap<Identifier, Block>,
    heights: BTreeMap<u64, BTreeSet<Identifier>>,
}

pub struct MemoryBlockStore {
    hasher: Arc<dyn Hasher>,
    inner: RwLock<Inner>,
}

impl MemoryBlockStore {
    pub fn new(hasher: Arc<dyn Hasher>) -> Self {
        Self {
            hasher,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().blocks.is_empty()
    }
}

impl BlockStore for MemoryBlockStore {
    fn has(&self, id: &Identifier) -> bool {
        self.inner.read().blocks.contains_key(id)
    }

    fn add(&self, block: Block) -> Result<bool> {
        let id = entity_id(self.hasher.as_ref(), &block)?;
        let mut inner = self.inner.write();
        if inner.blocks.contains_key(&id) {
            return Ok(false);
        }
        inner.heights.entry(block.height).or_default().insert(id);
        inner.blocks.insert(id, block);
        Ok(true)
    }

    fn remove(&self, id: &Identifier) -> bool {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let block = match inner.blocks.remove(id) {
            Some(b) => b,
            None => return false,
        };
        if let Some(ids) = inner.heights.get_mut(&block.height) {
            ids.remove(id);
            if ids.is_empty() {
                inner.heights.remove(&block.height);
            }
        }
        true
    }

    fn by_id(&self, id: &Identifier) -> Option<Block> {
        self.inner.read().blocks.get(id).cloned()
    }

    fn at_height(&self, height: u64) -> Vec<Block> {
        let inner = self.inner.read();
        inner
            .heights
            .get(&height)
            .map(|ids| ids.iter().filter_map(|id| inner.blocks.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    fn all(&self) -> Vec<Block> {
        let inner = self.inner.read();
        inner
            .heights
            .values()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| inner.blocks.get(id).cloned())
            .collect()
    }
}
