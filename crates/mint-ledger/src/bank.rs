use mint_core::error::LedgerError;
use mint_core::types::{Address, Amount, Coin};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::balance::BalanceTracker;
use crate::supply::SupplyTracker;

/// Ledger operations the mint keeper needs from the bank.
pub trait BankKeeper {
    /// Create `coin` out of nothing into the named module account.
    fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<(), LedgerError>;

    fn send_coins_from_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        coin: &Coin,
    ) -> Result<(), LedgerError>;

    /// Total supply of `denom`.
    fn get_supply(&self, denom: &str) -> Amount;

    fn has_module_account(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    Minter,
    Burner,
    Staking,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Permission::Minter => "minter",
            Permission::Burner => "burner",
            Permission::Staking => "staking",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAccount {
    pub name: String,
    pub address: Address,
    pub permissions: BTreeSet<Permission>,
}

impl ModuleAccount {
    pub fn new(name: &str, permissions: &[Permission]) -> Self {
        Self {
            name: name.to_string(),
            address: Address::module(name),
            permissions: permissions.iter().copied().collect(),
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// In-memory bank: balances, supply, module accounts and registered denoms.
///
/// Cloning gives a full checkpoint that can be restored if a block aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bank {
    balances: BalanceTracker,
    supply: SupplyTracker,
    modules: BTreeMap<String, ModuleAccount>,
    denoms: BTreeSet<String>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a module account.
    pub fn add_module_account(&mut self, name: &str, permissions: &[Permission]) {
        self.modules
            .insert(name.to_string(), ModuleAccount::new(name, permissions));
    }

    pub fn module_account(&self, name: &str) -> Option<&ModuleAccount> {
        self.modules.get(name)
    }

    pub fn register_denom(&mut self, denom: &str) {
        self.denoms.insert(denom.to_string());
    }

    pub fn is_registered(&self, denom: &str) -> bool {
        self.denoms.contains(denom)
    }

    /// Genesis allocation: credit `addr` and grow supply without minting.
    pub fn fund_account(&mut self, addr: &Address, coin: &Coin) -> Result<(), LedgerError> {
        self.check_coin(coin)?;
        self.supply.allocate(&coin.denom, coin.amount)?;
        self.balances.credit(addr, &coin.denom, coin.amount)
    }

    pub fn balance(&self, addr: &Address, denom: &str) -> Amount {
        self.balances.balance(addr, denom)
    }

    /// Balance of a module account, 0 if the module is unknown.
    pub fn module_balance(&self, module: &str, denom: &str) -> Amount {
        self.modules
            .get(module)
            .map(|m| self.balances.balance(&m.address, denom))
            .unwrap_or(0)
    }

    pub fn total_minted(&self, denom: &str) -> Amount {
        self.supply.total_minted(denom)
    }

    fn require_module(&self, name: &str) -> Result<&ModuleAccount, LedgerError> {
        self.modules
            .get(name)
            .ok_or_else(|| LedgerError::UnknownModuleAccount(name.to_string()))
    }

    fn check_coin(&self, coin: &Coin) -> Result<(), LedgerError> {
        if coin.is_zero() {
            return Err(LedgerError::InvalidCoin(coin.to_string()));
        }
        if !self.is_registered(&coin.denom) {
            return Err(LedgerError::UnregisteredDenom(coin.denom.clone()));
        }
        Ok(())
    }
}

impl BankKeeper for Bank {
    fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<(), LedgerError> {
        let account = self.require_module(module)?;
        if !account.has_permission(Permission::Minter) {
            return Err(LedgerError::MissingPermission {
                module: module.to_string(),
                permission: Permission::Minter.to_string(),
            });
        }
        let address = account.address.clone();
        self.check_coin(coin)?;

        self.supply.mint(&coin.denom, coin.amount)?;
        self.balances.credit(&address, &coin.denom, coin.amount)?;
        debug!(target: "bank", module, coin = %coin, "minted coins");
        Ok(())
    }

    fn send_coins_from_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        coin: &Coin,
    ) -> Result<(), LedgerError> {
        let from_addr = self.require_module(from)?.address.clone();
        let to_addr = self.require_module(to)?.address.clone();
        self.check_coin(coin)?;

        self.balances
            .transfer(&from_addr, &to_addr, &coin.denom, coin.amount)?;
        debug!(target: "bank", from, to, coin = %coin, "sent coins between modules");
        Ok(())
    }

    fn get_supply(&self, denom: &str) -> Amount {
        self.supply.supply(denom)
    }

    fn has_module_account(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mint_core::types::{FEE_COLLECTOR_NAME, MODULE_NAME};

    fn bank() -> Bank {
        let mut bank = Bank::new();
        bank.add_module_account(MODULE_NAME, &[Permission::Minter]);
        bank.add_module_account(FEE_COLLECTOR_NAME, &[]);
        bank.register_denom("stake");
        bank
    }

    #[test]
    fn test_mint_credits_module_and_supply() {
        let mut bank = bank();
        bank.mint_coins(MODULE_NAME, &Coin::new("stake", 20)).unwrap();
        assert_eq!(bank.module_balance(MODULE_NAME, "stake"), 20);
        assert_eq!(bank.get_supply("stake"), 20);
        assert_eq!(bank.total_minted("stake"), 20);
    }

    #[test]
    fn test_mint_requires_permission() {
        let mut bank = bank();
        let err = bank
            .mint_coins(FEE_COLLECTOR_NAME, &Coin::new("stake", 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::MissingPermission { .. }));
        assert_eq!(bank.get_supply("stake"), 0);
    }

    #[test]
    fn test_mint_unknown_module() {
        let mut bank = bank();
        assert_eq!(
            bank.mint_coins("distribution", &Coin::new("stake", 1)),
            Err(LedgerError::UnknownModuleAccount("distribution".to_string()))
        );
    }

    #[test]
    fn test_mint_unregistered_denom() {
        let mut bank = bank();
        assert_eq!(
            bank.mint_coins(MODULE_NAME, &Coin::new("ubnk", 1)),
            Err(LedgerError::UnregisteredDenom("ubnk".to_string()))
        );
    }

    #[test]
    fn test_zero_coin_invalid() {
        let mut bank = bank();
        assert!(matches!(
            bank.mint_coins(MODULE_NAME, &Coin::new("stake", 0)),
            Err(LedgerError::InvalidCoin(_))
        ));
    }

    #[test]
    fn test_send_between_modules() {
        let mut bank = bank();
        let coin = Coin::new("stake", 20);
        bank.mint_coins(MODULE_NAME, &coin).unwrap();
        bank.send_coins_from_module_to_module(MODULE_NAME, FEE_COLLECTOR_NAME, &coin)
            .unwrap();
        assert_eq!(bank.module_balance(MODULE_NAME, "stake"), 0);
        assert_eq!(bank.module_balance(FEE_COLLECTOR_NAME, "stake"), 20);
        // moving coins never changes supply
        assert_eq!(bank.get_supply("stake"), 20);
    }

    #[test]
    fn test_send_insufficient() {
        let mut bank = bank();
        let result =
            bank.send_coins_from_module_to_module(MODULE_NAME, FEE_COLLECTOR_NAME, &Coin::new("stake", 5));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    }

    #[test]
    fn test_fund_account_grows_supply() {
        let mut bank = bank();
        let alice = Address::new("alice");
        bank.fund_account(&alice, &Coin::new("stake", 1_000)).unwrap();
        assert_eq!(bank.balance(&alice, "stake"), 1_000);
        assert_eq!(bank.get_supply("stake"), 1_000);
        assert_eq!(bank.total_minted("stake"), 0);
    }

    #[test]
    fn test_clone_is_checkpoint() {
        let mut bank = bank();
        let checkpoint = bank.clone();
        bank.mint_coins(MODULE_NAME, &Coin::new("stake", 7)).unwrap();
        assert_ne!(bank, checkpoint);
        bank = checkpoint.clone();
        assert_eq!(bank.get_supply("stake"), 0);
    }
}
