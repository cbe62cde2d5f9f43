//! Nullable weight provider — programmable balances for testing.

use std::cell::RefCell;
use std::collections::HashMap;

use tally_ledger::WeightProvider;
use tally_types::HolderAddress;

/// A deterministic balance lookup backed by an in-memory table.
///
/// Balances can be changed between calls through a shared reference, which
/// is exactly what the real collaborator allows: the ledger re-queries the
/// current weight on every vote.
#[derive(Default)]
pub struct NullWeightProvider {
    balances: RefCell<HashMap<HolderAddress, u128>>,
}

impl NullWeightProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the balance returned for `holder`. Unset holders have weight 0.
    pub fn set_balance(&self, holder: &HolderAddress, balance: u128) {
        self.balances.borrow_mut().insert(holder.clone(), balance);
    }
}

impl WeightProvider for NullWeightProvider {
    fn balance_of(&self, holder: &HolderAddress) -> u128 {
        self.balances.borrow().get(holder).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_holders_have_zero_weight() {
        let provider = NullWeightProvider::new();
        assert_eq!(provider.balance_of(&HolderAddress::new("nobody")), 0);
    }

    #[test]
    fn balances_can_change_between_queries() {
        let provider = NullWeightProvider::new();
        let holder = HolderAddress::new("holder_a");
        provider.set_balance(&holder, 3);
        assert_eq!(provider.balance_of(&holder), 3);
        provider.set_balance(&holder, 40);
        assert_eq!(provider.balance_of(&holder), 40);
    }
}
