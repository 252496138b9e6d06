// evmhost/core/storage/src/error.rs

/// Storage error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Corrupted block at height {height}: {reason}")]
    Corrupted { height: u64, reason: String },
}
