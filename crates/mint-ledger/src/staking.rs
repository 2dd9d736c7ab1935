use mint_core::types::Amount;

/// Staking data the mint keeper reads each block.
pub trait StakingKeeper {
    fn total_bonded_tokens(&self) -> Amount;
}

/// Bonded/unbonded token pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StakingPool {
    bonded: Amount,
    not_bonded: Amount,
}

impl StakingPool {
    pub fn new(bonded: Amount, not_bonded: Amount) -> Self {
        Self { bonded, not_bonded }
    }

    pub fn set_bonded(&mut self, bonded: Amount) {
        self.bonded = bonded;
    }

    pub fn not_bonded_tokens(&self) -> Amount {
        self.not_bonded
    }

    /// Move tokens from not-bonded to bonded; bonds at most what is available.
    pub fn bond(&mut self, amount: Amount) -> Amount {
        let moved = amount.min(self.not_bonded);
        self.not_bonded -= moved;
        self.bonded = self.bonded.saturating_add(moved);
        moved
    }

    /// Move tokens from bonded to not-bonded; unbonds at most what is bonded.
    pub fn unbond(&mut self, amount: Amount) -> Amount {
        let moved = amount.min(self.bonded);
        self.bonded -= moved;
        self.not_bonded = self.not_bonded.saturating_add(moved);
        moved
    }
}

impl StakingKeeper for StakingPool {
    fn total_bonded_tokens(&self) -> Amount {
        self.bonded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_and_unbond() {
        let mut pool = StakingPool::new(0, 100);
        assert_eq!(pool.bond(60), 60);
        assert_eq!(pool.total_bonded_tokens(), 60);
        assert_eq!(pool.not_bonded_tokens(), 40);

        assert_eq!(pool.unbond(100), 60);
        assert_eq!(pool.total_bonded_tokens(), 0);
        assert_eq!(pool.not_bonded_tokens(), 100);
    }

    #[test]
    fn test_bond_capped_by_available() {
        let mut pool = StakingPool::new(10, 5);
        assert_eq!(pool.bond(50), 5);
        assert_eq!(pool.total_bonded_tokens(), 15);
    }
}
