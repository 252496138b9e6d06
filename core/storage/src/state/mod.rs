// evmhost/core/storage/src/state/mod.rs

// Account balance state
pub mod account;

pub use account::{AccountManager, AccountState, LedgerStore};
