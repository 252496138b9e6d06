// evmhost/core/storage/src/state/account.rs

use evmhost_primitives::{Address, U256};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Account balance store consulted by value transfers.
///
/// Mutations never fail: a missing account reads as a zero balance and is
/// created on first write.
pub trait LedgerStore: Send + Sync {
    fn get_balance(&self, address: &Address) -> U256;

    fn set_balance(&self, address: Address, balance: U256);

    fn add_balance(&self, address: Address, amount: U256);

    fn sub_balance(&self, address: Address, amount: U256);

    /// Debit `from` and credit `to` by `amount`.
    ///
    /// Moving value to the same account leaves it untouched. Implementations
    /// shared between threads should override this so readers never see the
    /// debit without the credit.
    fn move_balance(&self, from: &Address, to: &Address, amount: U256) {
        if from == to {
            return;
        }
        self.sub_balance(*from, amount);
        self.add_balance(*to, amount);
    }
}

/// Account state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub nonce: u64,
    pub balance: U256,
}

/// In-memory account ledger
#[derive(Default)]
pub struct AccountManager {
    accounts: RwLock<HashMap<Address, AccountState>>,
}

impl AccountManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get account, or the empty account if it does not exist
    pub fn get_account(&self, address: &Address) -> AccountState {
        self.accounts
            .read()
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_account(&self, address: Address, account: AccountState) {
        self.accounts.write().insert(address, account);
    }

    pub fn get_nonce(&self, address: &Address) -> u64 {
        self.accounts
            .read()
            .get(address)
            .map(|a| a.nonce)
            .unwrap_or(0)
    }

    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.accounts.write().entry(address).or_default().nonce = nonce;
    }

    /// Increment nonce and return the new value
    pub fn increment_nonce(&self, address: Address) -> u64 {
        let mut accounts = self.accounts.write();
        let account = accounts.entry(address).or_default();
        account.nonce = account.nonce.saturating_add(1);
        account.nonce
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> U256 {
        self.accounts
            .read()
            .values()
            .fold(U256::zero(), |acc, a| acc.saturating_add(a.balance))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    fn debit(accounts: &mut HashMap<Address, AccountState>, address: Address, amount: U256) {
        let account = accounts.entry(address).or_default();
        match account.balance.checked_sub(amount) {
            Some(balance) => account.balance = balance,
            None => {
                warn!(
                    "Balance underflow for {}: have {}, debit {}; flooring at zero",
                    address, account.balance, amount
                );
                account.balance = U256::zero();
            }
        }
    }

    fn credit(accounts: &mut HashMap<Address, AccountState>, address: Address, amount: U256) {
        let account = accounts.entry(address).or_default();
        match account.balance.checked_add(amount) {
            Some(balance) => account.balance = balance,
            None => {
                warn!(
                    "Balance overflow for {}: have {}, credit {}; saturating",
                    address, account.balance, amount
                );
                account.balance = U256::MAX;
            }
        }
    }
}

impl LedgerStore for AccountManager {
    fn get_balance(&self, address: &Address) -> U256 {
        self.accounts
            .read()
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    fn set_balance(&self, address: Address, balance: U256) {
        self.accounts.write().entry(address).or_default().balance = balance;
    }

    fn add_balance(&self, address: Address, amount: U256) {
        Self::credit(&mut self.accounts.write(), address, amount);
    }

    fn sub_balance(&self, address: Address, amount: U256) {
        Self::debit(&mut self.accounts.write(), address, amount);
    }

    fn move_balance(&self, from: &Address, to: &Address, amount: U256) {
        if from == to {
            return;
        }
        // One guard across both halves
        let mut accounts = self.accounts.write();
        Self::debit(&mut accounts, *from, amount);
        Self::credit(&mut accounts, *to, amount);
    }
}
