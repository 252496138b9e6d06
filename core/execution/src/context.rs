// evmhost/core/execution/src/context.rs

use crate::config::{BeneficiaryPolicy, ContextConfig, ZeroAddressFallback};
use crate::hash_resolver::ChainHashResolver;
use crate::ledger::{self, CanTransferFn, TransferFn};
use crate::message::Message;
use crate::metrics::CONTEXTS_BUILT_TOTAL;
use evmhost_primitives::{Address, BlockHeader, Hash, U256};
use evmhost_storage::{BlockStore, LedgerStore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Block hash capability, bound to one reference header
pub type GetHashFn = Box<dyn Fn(u64) -> Hash + Send + Sync>;

/// Environment handed to the interpreter for a single transaction.
///
/// Nothing in a context changes after construction; the only internal state
/// is the memoized hash lookup owned by `get_hash`.
pub struct ExecutionContext {
    can_transfer: CanTransferFn,
    transfer: TransferFn,
    get_hash: GetHashFn,

    origin: Address,
    coinbase: Address,
    block_number: U256,
    time: U256,
    difficulty: U256,
    gas_limit: u64,
    gas_price: U256,
}

impl ExecutionContext {
    /// Build a context from explicit configuration
    pub fn with_config(
        msg: &Message,
        header: &BlockHeader,
        chain: Arc<dyn BlockStore>,
        author: Address,
        config: &ContextConfig,
    ) -> Self {
        ContextBuilder::new(config.clone()).build(msg, header, chain, author)
    }

    pub fn can_transfer(&self, ledger: &dyn LedgerStore, address: &Address, amount: U256) -> bool {
        (self.can_transfer)(ledger, address, amount)
    }

    pub fn transfer(
        &self,
        ledger: &dyn LedgerStore,
        sender: &Address,
        recipient: &Address,
        amount: U256,
    ) {
        (self.transfer)(ledger, sender, recipient, amount)
    }

    /// Hash of block `n`, or the zero hash when it cannot be resolved
    pub fn get_hash(&self, n: u64) -> Hash {
        (self.get_hash)(n)
    }

    /// Transaction origin
    pub fn origin(&self) -> Address {
        self.origin
    }

    pub fn coinbase(&self) -> Address {
        self.coinbase
    }

    pub fn block_number(&self) -> U256 {
        self.block_number
    }

    /// Block timestamp
    pub fn time(&self) -> U256 {
        self.time
    }

    pub fn difficulty(&self) -> U256 {
        self.difficulty
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("origin", &self.origin)
            .field("coinbase", &self.coinbase)
            .field("block_number", &self.block_number)
            .field("time", &self.time)
            .field("difficulty", &self.difficulty)
            .field("gas_limit", &self.gas_limit)
            .field("gas_price", &self.gas_price)
            .finish_non_exhaustive()
    }
}

/// Creates a new context for use in the EVM with default configuration
pub fn new_context(
    msg: &Message,
    header: &BlockHeader,
    chain: Arc<dyn BlockStore>,
    author: Address,
) -> ExecutionContext {
    ContextBuilder::default().build(msg, header, chain, author)
}

/// Builds execution contexts from shared configuration
pub struct ContextBuilder {
    config: ContextConfig,
    beneficiary_policy: Arc<dyn BeneficiaryPolicy>,
}

impl ContextBuilder {
    pub fn new(config: ContextConfig) -> Self {
        let beneficiary_policy = Arc::new(ZeroAddressFallback::new(config.placeholder_coinbase));
        Self {
            config,
            beneficiary_policy,
        }
    }

    /// Replace the default zero-address fallback
    pub fn with_beneficiary_policy(mut self, policy: Arc<dyn BeneficiaryPolicy>) -> Self {
        self.beneficiary_policy = policy;
        self
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn build(
        &self,
        msg: &Message,
        header: &BlockHeader,
        chain: Arc<dyn BlockStore>,
        author: Address,
    ) -> ExecutionContext {
        let coinbase = self.beneficiary_policy.resolve(author);

        // Fresh resolver per context; its cache is only valid for this header
        let resolver = ChainHashResolver::with_window(header, chain, self.config.lookup_window());
        let get_hash: GetHashFn = Box::new(move |n| resolver.resolve(n));

        let context = ExecutionContext {
            can_transfer: ledger::can_transfer,
            transfer: ledger::transfer,
            get_hash,
            origin: msg.from(),
            coinbase,
            block_number: U256::from(header.height),
            time: U256::from(header.timestamp),
            difficulty: self.config.difficulty,
            gas_limit: self.config.gas_limit,
            gas_price: msg.gas_price(),
        };

        CONTEXTS_BUILT_TOTAL.inc();
        debug!(
            "Built execution context: origin={} coinbase={} block={} time={}",
            context.origin, context.coinbase, header.height, header.timestamp
        );
        context
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}
