// evmhost/core/storage/src/chain/block_store.rs

use crate::error::StoreError;
use evmhost_primitives::Block;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// Read access to historical blocks by height.
///
/// `Ok(None)` means the store has no block at that height. Implementations
/// must be safe to share between execution contexts.
pub trait BlockStore: Send + Sync {
    fn get_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError>;
}

/// In-memory block store keyed by height
#[derive(Default)]
pub struct MemoryBlockStore {
    blocks: RwLock<BTreeMap<u64, Block>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a sequence of blocks
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let store = Self::new();
        for block in blocks {
            store.insert_block(block);
        }
        store
    }

    /// Store a block, replacing any existing block at the same height
    pub fn insert_block(&self, block: Block) -> Option<Block> {
        let height = block.height();
        let previous = self.blocks.write().insert(height, block);
        if previous.is_some() {
            debug!("Replaced block at height {}", height);
        }
        previous
    }

    /// Highest stored block
    pub fn latest_block(&self) -> Option<Block> {
        self.blocks
            .read()
            .last_key_value()
            .map(|(_, block)| block.clone())
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

impl BlockStore for MemoryBlockStore {
    fn get_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError> {
        Ok(self.blocks.read().get(&height).cloned())
    }
}
