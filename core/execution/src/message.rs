// evmhost/core/execution/src/message.rs

use evmhost_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One execution request handed to the host.
///
/// Fields are fixed at construction; an `ExecutionContext` copies what it
/// needs out of the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    from: Address,
    to: Option<Address>,
    nonce: u64,
    value: U256,
    gas_limit: u64,
    gas_price: U256,
    data: Vec<u8>,
    check_nonce: bool,
}

impl Message {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from: Address,
        to: Option<Address>,
        nonce: u64,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        data: Vec<u8>,
        check_nonce: bool,
    ) -> Self {
        Self {
            from,
            to,
            nonce,
            value,
            gas_limit,
            gas_price,
            data,
            check_nonce,
        }
    }

    pub fn from(&self) -> Address {
        self.from
    }

    /// Recipient, `None` for contract creation
    pub fn to(&self) -> Option<Address> {
        self.to
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    /// Gas limit
    pub fn gas(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn check_nonce(&self) -> bool {
        self.check_nonce
    }

    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}
