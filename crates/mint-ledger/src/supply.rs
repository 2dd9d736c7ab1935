use mint_core::error::LedgerError;
use mint_core::types::Amount;
use std::collections::BTreeMap;

/// Total supply per denom, plus the cumulative amount ever minted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyTracker {
    supply: BTreeMap<String, Amount>,
    minted: BTreeMap<String, Amount>,
}

impl SupplyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current total supply of `denom`.
    pub fn supply(&self, denom: &str) -> Amount {
        self.supply.get(denom).copied().unwrap_or(0)
    }

    /// Everything minted for `denom` since the tracker was created.
    pub fn total_minted(&self, denom: &str) -> Amount {
        self.minted.get(denom).copied().unwrap_or(0)
    }

    /// Grow supply from a genesis allocation. Not counted as minted.
    pub fn allocate(&mut self, denom: &str, amount: Amount) -> Result<(), LedgerError> {
        add_to(&mut self.supply, denom, amount)
    }

    pub fn mint(&mut self, denom: &str, amount: Amount) -> Result<(), LedgerError> {
        add_to(&mut self.supply, denom, amount)?;
        add_to(&mut self.minted, denom, amount)
    }
}

fn add_to(map: &mut BTreeMap<String, Amount>, denom: &str, amount: Amount) -> Result<(), LedgerError> {
    let entry = map.entry(denom.to_string()).or_insert(0);
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| LedgerError::SupplyOverflow(denom.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_denom_zero() {
        let t = SupplyTracker::new();
        assert_eq!(t.supply("stake"), 0);
        assert_eq!(t.total_minted("stake"), 0);
    }

    #[test]
    fn test_allocation_not_counted_as_minted() {
        let mut t = SupplyTracker::new();
        t.allocate("stake", 1_000_000_000).unwrap();
        assert_eq!(t.supply("stake"), 1_000_000_000);
        assert_eq!(t.total_minted("stake"), 0);
    }

    #[test]
    fn test_mint_increases_supply() {
        let mut t = SupplyTracker::new();
        t.allocate("stake", 100).unwrap();
        t.mint("stake", 20).unwrap();
        t.mint("stake", 20).unwrap();
        assert_eq!(t.supply("stake"), 140);
        assert_eq!(t.total_minted("stake"), 40);
    }

    #[test]
    fn test_overflow_rejected() {
        let mut t = SupplyTracker::new();
        t.allocate("stake", Amount::MAX).unwrap();
        assert!(matches!(
            t.mint("stake", 1),
            Err(LedgerError::SupplyOverflow(_))
        ));
    }
}
