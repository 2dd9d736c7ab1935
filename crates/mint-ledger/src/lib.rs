//! Bank and staking collaborators consumed by the mint keeper.

pub mod balance;
pub mod bank;
pub mod staking;
pub mod supply;

pub use bank::{Bank, BankKeeper, ModuleAccount, Permission};
pub use staking::{StakingKeeper, StakingPool};
