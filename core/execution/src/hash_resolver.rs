// evmhost/core/execution/src/hash_resolver.rs

// Historical block hash lookup backing BLOCKHASH
use crate::metrics::{BLOCKHASH_LOOKUPS_TOTAL, BLOCKHASH_STORE_READS_TOTAL};
use evmhost_primitives::{BlockHeader, Hash};
use evmhost_storage::BlockStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// How far below the reference block hashes can be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashLookupWindow {
    /// Any ancestor down to genesis
    #[default]
    Unbounded,
    /// Only the given number of most recent ancestors
    Recent(u64),
}

impl From<Option<u64>> for HashLookupWindow {
    fn from(depth: Option<u64>) -> Self {
        match depth {
            Some(depth) => HashLookupWindow::Recent(depth),
            None => HashLookupWindow::Unbounded,
        }
    }
}

/// Lookup counters for one resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cache_hits: u64,
    pub store_reads: u64,
    pub misses: u64,
}

#[derive(Default)]
struct ResolverState {
    /// height -> hash, contiguous from `oldest` up to the reference parent
    cache: HashMap<u64, Hash>,
    oldest: u64,
    stats: ResolverStats,
}

/// Resolves ancestor hashes of a reference header by walking parent links.
///
/// Results are memoized for the lifetime of the resolver. A resolver is
/// bound to the header it was built from and must not be reused for another
/// one. Any height that cannot be resolved yields the zero hash.
pub struct ChainHashResolver {
    reference_height: u64,
    reference_parent: Hash,
    chain: Arc<dyn BlockStore>,
    window: HashLookupWindow,
    state: Mutex<ResolverState>,
}

impl ChainHashResolver {
    pub fn new(reference: &BlockHeader, chain: Arc<dyn BlockStore>) -> Self {
        Self::with_window(reference, chain, HashLookupWindow::Unbounded)
    }

    pub fn with_window(
        reference: &BlockHeader,
        chain: Arc<dyn BlockStore>,
        window: HashLookupWindow,
    ) -> Self {
        Self {
            reference_height: reference.height,
            reference_parent: reference.prev_block_hash,
            chain,
            window,
            state: Mutex::new(ResolverState::default()),
        }
    }

    pub fn window(&self) -> HashLookupWindow {
        self.window
    }

    pub fn stats(&self) -> ResolverStats {
        self.state.lock().stats
    }

    /// Hash of the ancestor at height `n`, or the zero hash if unknown
    pub fn resolve(&self, n: u64) -> Hash {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if !self.in_range(n) {
            trace!(
                "Height {} outside lookup range of block {}",
                n,
                self.reference_height
            );
            return Self::miss(state);
        }

        if state.cache.is_empty() {
            let parent_height = self.reference_height - 1;
            state.cache.insert(parent_height, self.reference_parent);
            state.oldest = parent_height;
        }

        if let Some(hash) = state.cache.get(&n).copied() {
            trace!("Block hash cache hit for height {}", n);
            state.stats.cache_hits += 1;
            BLOCKHASH_LOOKUPS_TOTAL.with_label_values(&["hit"]).inc();
            return hash;
        }

        // Not cached, so n < oldest and every step below stays above zero
        let mut height = state.oldest;
        loop {
            let expected = match state.cache.get(&height).copied() {
                Some(hash) => hash,
                None => return Self::miss(state),
            };

            state.stats.store_reads += 1;
            BLOCKHASH_STORE_READS_TOTAL.inc();

            let block = match self.chain.get_block_by_height(height) {
                Ok(Some(block)) => block,
                Ok(None) => {
                    debug!("No block at height {} while resolving {}", height, n);
                    return Self::miss(state);
                }
                Err(e) => {
                    debug!(
                        "Block store error at height {} while resolving {}: {}",
                        height, n, e
                    );
                    return Self::miss(state);
                }
            };

            let actual = block.hash();
            if actual != expected {
                debug!(
                    "Broken header chain at height {}: expected {}, found {}",
                    height, expected, actual
                );
                return Self::miss(state);
            }

            let parent_height = height - 1;
            let parent = block.parent_hash();
            state.cache.insert(parent_height, parent);
            state.oldest = parent_height;

            if parent_height == n {
                BLOCKHASH_LOOKUPS_TOTAL
                    .with_label_values(&["resolved"])
                    .inc();
                return parent;
            }
            height = parent_height;
        }
    }

    fn in_range(&self, n: u64) -> bool {
        if n >= self.reference_height {
            return false;
        }
        match self.window {
            HashLookupWindow::Unbounded => true,
            HashLookupWindow::Recent(depth) => self.reference_height - n <= depth,
        }
    }

    fn miss(state: &mut ResolverState) -> Hash {
        state.stats.misses += 1;
        BLOCKHASH_LOOKUPS_TOTAL.with_label_values(&["miss"]).inc();
        Hash::zero()
    }
}
