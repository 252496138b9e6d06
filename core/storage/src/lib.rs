// evmhost/core/storage/src/lib.rs

// Storage collaborators consumed by the execution environment:
// historical blocks by height and account balances.
pub mod chain;
pub mod error;
pub mod state;

pub use chain::{BlockStore, MemoryBlockStore};
pub use error::StoreError;
pub use state::{AccountManager, AccountState, LedgerStore};
