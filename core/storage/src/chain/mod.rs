// evmhost/core/storage/src/chain/mod.rs

// Chain storage module
pub mod block_store;

pub use block_store::{BlockStore, MemoryBlockStore};
