//! Mint keeper: per-block inflation, provisioning and the genesis/query
//! surface around it.

pub mod abci;
pub mod context;
pub mod events;
pub mod keeper;
pub mod module;
pub mod query;
pub mod strategy;

pub use abci::{BlockExecutor, BlockOutcome};
pub use context::Context;
pub use keeper::{BlockMint, Keeper, KeeperConfig};
pub use module::AppModule;
pub use query::QueryServer;
pub use strategy::{DefaultInflation, FixedInflation, InflationStrategy};
