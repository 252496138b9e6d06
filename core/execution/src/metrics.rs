// evmhost/core/execution/src/metrics.rs

// Metrics for context construction, block-hash lookups and transfers
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

pub static CONTEXTS_BUILT_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "evmhost_contexts_built_total",
        "Number of execution contexts constructed"
    )
    .expect("register evmhost_contexts_built_total")
});

pub static BLOCKHASH_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "evmhost_blockhash_lookups_total",
        "Block hash lookups by outcome",
        &["result"]
    )
    .expect("register evmhost_blockhash_lookups_total")
});

pub static BLOCKHASH_STORE_READS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "evmhost_blockhash_store_reads_total",
        "Block store reads issued while resolving block hashes"
    )
    .expect("register evmhost_blockhash_store_reads_total")
});

pub static TRANSFERS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("evmhost_transfers_total", "Value transfers applied")
        .expect("register evmhost_transfers_total")
});
