// evmhost/core/execution/src/ledger.rs

// Value transfer primitives exposed to the interpreter
use crate::metrics::TRANSFERS_TOTAL;
use evmhost_primitives::{Address, U256};
use evmhost_storage::LedgerStore;
use tracing::trace;

/// Signature of the balance sufficiency capability
pub type CanTransferFn = fn(&dyn LedgerStore, &Address, U256) -> bool;

/// Signature of the balance transfer capability
pub type TransferFn = fn(&dyn LedgerStore, &Address, &Address, U256);

/// Checks whether there are enough funds in the address' account to make a transfer.
/// This does not take the necessary gas into account.
pub fn can_transfer(ledger: &dyn LedgerStore, address: &Address, amount: U256) -> bool {
    ledger.get_balance(address) >= amount
}

/// Subtracts `amount` from `sender` and adds it to `recipient`.
///
/// No sufficiency check is made here; callers gate with [`can_transfer`].
pub fn transfer(ledger: &dyn LedgerStore, sender: &Address, recipient: &Address, amount: U256) {
    trace!("Transfer {} from {} to {}", amount, sender, recipient);
    ledger.move_balance(sender, recipient, amount);
    TRANSFERS_TOTAL.inc();
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmhost_storage::AccountManager;

    #[test]
    fn test_can_transfer_boundaries() {
        let ledger = AccountManager::new();
        let addr = Address::zero();
        ledger.set_balance(addr, U256::from(50));

        assert!(can_transfer(&ledger, &addr, U256::zero()));
        assert!(can_transfer(&ledger, &addr, U256::from(10)));
        assert!(can_transfer(&ledger, &addr, U256::from(50)));
        assert!(!can_transfer(&ledger, &addr, U256::from(51)));
    }

    #[test]
    fn test_can_transfer_unknown_account() {
        let ledger = AccountManager::new();
        let addr = Address([7; 20]);
        assert!(can_transfer(&ledger, &addr, U256::zero()));
        assert!(!can_transfer(&ledger, &addr, U256::one()));
    }

    #[test]
    fn test_transfer() {
        let ledger = AccountManager::new();
        let address1 = Address::zero();
        let mut raw = [0u8; 20];
        raw[19] = 1;
        let address2 = Address(raw);
        ledger.set_balance(address1, U256::from(100));
        ledger.set_balance(address2, U256::from(100));

        transfer(&ledger, &address1, &address2, U256::from(50));
        assert_eq!(ledger.get_balance(&address1), U256::from(50));
        assert_eq!(ledger.get_balance(&address2), U256::from(150));
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let ledger = AccountManager::new();
        let addr = Address([3; 20]);
        ledger.set_balance(addr, U256::from(80));
        transfer(&ledger, &addr, &addr, U256::from(80));
        assert_eq!(ledger.get_balance(&addr), U256::from(80));
    }

    #[test]
    fn test_transfer_to_new_account() {
        let ledger = AccountManager::new();
        let from = Address([1; 20]);
        let to = Address([2; 20]);
        ledger.set_balance(from, U256::from(10));

        transfer(&ledger, &from, &to, U256::from(10));
        assert_eq!(ledger.get_balance(&from), U256::zero());
        assert_eq!(ledger.get_balance(&to), U256::from(10));
    }

    #[test]
    fn test_capability_types() {
        let check: CanTransferFn = can_transfer;
        let apply: TransferFn = transfer;
        let ledger = AccountManager::new();
        let a = Address([1; 20]);
        let b = Address([2; 20]);
        ledger.set_balance(a, U256::from(5));

        assert!(check(&ledger, &a, U256::from(5)));
        apply(&ledger, &a, &b, U256::from(5));
        assert_eq!(ledger.get_balance(&b), U256::from(5));
    }
}
