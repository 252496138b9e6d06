// evmhost/core/execution/src/lib.rs

// Re-export modules
pub mod config;
pub mod context;
pub mod hash_resolver;
pub mod ledger;
pub mod message;
pub mod metrics;

pub use config::{BeneficiaryPolicy, ConfigError, ContextConfig, ZeroAddressFallback};
pub use context::{new_context, ContextBuilder, ExecutionContext, GetHashFn};
pub use hash_resolver::{ChainHashResolver, HashLookupWindow, ResolverStats};
pub use ledger::{can_transfer, transfer, CanTransferFn, TransferFn};
pub use message::Message;

pub use evmhost_primitives::{Address, Block, BlockHeader, Hash, U256};
pub use evmhost_storage::{BlockStore, LedgerStore, StoreError};
