// Shared fixtures for the execution integration tests

#![allow(dead_code)]

use evmhost_execution::{Address, Block, BlockHeader, BlockStore, Hash, Message, StoreError, U256};
use evmhost_storage::MemoryBlockStore;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::Mutex;

/// Route `tracing` output to the test harness; honours RUST_LOG
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn create_test_address(num: u8) -> Address {
    let mut addr = [0u8; 20];
    addr[0] = num;
    Address(addr)
}

pub fn create_test_header(height: u64, prev: Hash) -> BlockHeader {
    BlockHeader {
        height,
        timestamp: 1_000_000 + height * 10,
        prev_block_hash: prev,
        state_root: Hash::default(),
        tx_root: Hash::default(),
        coinbase: Address::zero(),
    }
}

/// Linked blocks at heights `0..len` and the header that would come next
pub fn create_test_chain(len: u64) -> (Vec<Block>, BlockHeader) {
    let mut blocks = Vec::with_capacity(len as usize);
    let mut prev = Hash::zero();
    for height in 0..len {
        let block = Block::new(create_test_header(height, prev));
        prev = block.hash();
        blocks.push(block);
    }
    (blocks, create_test_header(len, prev))
}

pub fn create_test_message(from: Address, gas_price: u64) -> Message {
    Message::new(
        from,
        Some(create_test_address(0xff)),
        0,
        U256::zero(),
        3_000,
        U256::from(gas_price),
        Vec::new(),
        true,
    )
}

/// Block store that records every height it is asked for
pub struct CountingStore {
    inner: MemoryBlockStore,
    reads: AtomicU64,
    requested: Mutex<Vec<u64>>,
}

impl CountingStore {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            inner: MemoryBlockStore::from_blocks(blocks),
            reads: AtomicU64::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().clone()
    }
}

impl BlockStore for CountingStore {
    fn get_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(height);
        self.inner.get_block_by_height(height)
    }
}

/// Block store that fails for selected heights
pub struct FaultyStore {
    inner: MemoryBlockStore,
    failing: HashSet<u64>,
}

impl FaultyStore {
    pub fn new(blocks: Vec<Block>, failing: impl IntoIterator<Item = u64>) -> Self {
        Self {
            inner: MemoryBlockStore::from_blocks(blocks),
            failing: failing.into_iter().collect(),
        }
    }
}

impl BlockStore for FaultyStore {
    fn get_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError> {
        if self.failing.contains(&height) {
            return Err(StoreError::Corrupted {
                height,
                reason: "checksum mismatch".to_string(),
            });
        }
        self.inner.get_block_by_height(height)
    }
}
