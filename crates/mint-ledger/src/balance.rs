use mint_core::error::LedgerError;
use mint_core::types::{Address, Amount};
use std::collections::BTreeMap;

/// Per-address, per-denom balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceTracker {
    balances: BTreeMap<(Address, String), Amount>,
}

impl BalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `denom` held by `addr` (0 if unknown).
    pub fn balance(&self, addr: &Address, denom: &str) -> Amount {
        self.balances
            .get(&(addr.clone(), denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn credit(&mut self, addr: &Address, denom: &str, amount: Amount) -> Result<(), LedgerError> {
        let entry = self
            .balances
            .entry((addr.clone(), denom.to_string()))
            .or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| LedgerError::SupplyOverflow(denom.to_string()))?;
        Ok(())
    }

    /// Fails without touching the balance if `addr` holds less than `amount`.
    pub fn debit(&mut self, addr: &Address, denom: &str, amount: Amount) -> Result<(), LedgerError> {
        let current = self.balance(addr, denom);
        if current < amount {
            return Err(LedgerError::InsufficientBalance {
                account: addr.to_string(),
                denom: denom.to_string(),
                have: current,
                need: amount,
            });
        }
        let key = (addr.clone(), denom.to_string());
        if current == amount {
            self.balances.remove(&key);
        } else {
            self.balances.insert(key, current - amount);
        }
        Ok(())
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        denom: &str,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.debit(from, denom, amount)?;
        self.credit(to, denom, amount)
    }

    /// Non-zero balances in (address, denom) order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &str, Amount)> {
        self.balances
            .iter()
            .map(|((addr, denom), amount)| (addr, denom.as_str(), *amount))
    }
}
