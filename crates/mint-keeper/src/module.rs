use mint_core::error::MintError;
use mint_core::genesis::GenesisState;
use mint_core::types::MODULE_NAME;
use mint_ledger::{BankKeeper, StakingKeeper};
use mint_store::KvStore;

use crate::context::Context;
use crate::keeper::{BlockMint, Keeper, KeeperConfig};
use crate::strategy::{DefaultInflation, InflationStrategy};

/// Host-facing adapter around [`Keeper`]: genesis as JSON bytes plus the
/// per-block hook.
pub struct AppModule<B, S> {
    keeper: Keeper<B, S>,
}

impl<B: BankKeeper, S: StakingKeeper> AppModule<B, S> {
    pub const NAME: &'static str = MODULE_NAME;

    /// `strategy` of `None` selects [`DefaultInflation`].
    pub fn new(
        config: KeeperConfig,
        bank: B,
        staking: S,
        strategy: Option<Box<dyn InflationStrategy>>,
    ) -> Self {
        let strategy = strategy.unwrap_or_else(|| Box::new(DefaultInflation));
        Self {
            keeper: Keeper::new(config, bank, staking, strategy),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn consensus_version(&self) -> u64 {
        1
    }

    pub fn keeper(&self) -> &Keeper<B, S> {
        &self.keeper
    }

    pub fn keeper_mut(&mut self) -> &mut Keeper<B, S> {
        &mut self.keeper
    }

    pub fn default_genesis(&self) -> Result<Vec<u8>, MintError> {
        encode_genesis(&GenesisState::default())
    }

    pub fn validate_genesis(&self, bz: &[u8]) -> Result<(), MintError> {
        decode_genesis(bz)?.validate()?;
        Ok(())
    }

    pub fn init_genesis(&mut self, ctx: &mut Context<'_>, bz: &[u8]) -> Result<(), MintError> {
        let genesis = decode_genesis(bz)?;
        self.keeper.init_genesis(ctx, &genesis)
    }

    pub fn export_genesis(&self, store: &KvStore) -> Result<Vec<u8>, MintError> {
        encode_genesis(&self.keeper.export_genesis(store)?)
    }

    pub fn begin_block(&mut self, ctx: &mut Context<'_>) -> Result<BlockMint, MintError> {
        self.keeper.begin_block(ctx)
    }
}

fn decode_genesis(bz: &[u8]) -> Result<GenesisState, MintError> {
    serde_json::from_slice(bz).map_err(|e| MintError::GenesisDecode(e.to_string()))
}

fn encode_genesis(genesis: &GenesisState) -> Result<Vec<u8>, MintError> {
    serde_json::to_vec(genesis).map_err(|e| MintError::GenesisEncode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FixedInflation;
    use mint_core::error::ValidationError;
    use mint_core::types::FEE_COLLECTOR_NAME;
    use mint_ledger::{Bank, Permission, StakingPool};
    use mint_math::Dec;

    fn module(strategy: Option<Box<dyn InflationStrategy>>) -> AppModule<Bank, StakingPool> {
        let mut bank = Bank::new();
        bank.add_module_account(MODULE_NAME, &[Permission::Minter]);
        bank.add_module_account(FEE_COLLECTOR_NAME, &[]);
        bank.register_denom("stake");
        AppModule::new(KeeperConfig::default(), bank, StakingPool::default(), strategy)
    }

    #[test]
    fn test_identity() {
        let m = module(None);
        assert_eq!(m.name(), "mint");
        assert_eq!(m.consensus_version(), 1);
    }

    #[test]
    fn test_default_genesis_is_valid_json() {
        let m = module(None);
        let bz = m.default_genesis().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bz).unwrap();
        assert_eq!(json["minter"]["inflation"], "0.130000000000000000");
        assert_eq!(json["params"]["mint_denom"], "stake");
        assert_eq!(json["params"]["blocks_per_year"], 6_311_520);
        m.validate_genesis(&bz).unwrap();
    }

    #[test]
    fn test_validate_genesis_rejects_garbage() {
        let m = module(None);
        assert!(matches!(
            m.validate_genesis(b"{\"minter\":"),
            Err(MintError::GenesisDecode(_))
        ));
    }

    #[test]
    fn test_validate_genesis_rejects_bad_params() {
        let m = module(None);
        let mut genesis = GenesisState::default();
        genesis.params.mint_denom = String::new();
        let bz = serde_json::to_vec(&genesis).unwrap();
        assert!(matches!(
            m.validate_genesis(&bz),
            Err(MintError::Validation(ValidationError::BlankDenom))
        ));
    }

    #[test]
    fn test_init_then_export_roundtrip() {
        let mut m = module(None);
        let mut store = KvStore::in_memory().unwrap();
        let mut ctx = Context::new(0, &mut store);
        let bz = m.default_genesis().unwrap();
        m.init_genesis(&mut ctx, &bz).unwrap();

        let exported = m.export_genesis(ctx.store()).unwrap();
        let a: GenesisState = serde_json::from_slice(&bz).unwrap();
        let b: GenesisState = serde_json::from_slice(&exported).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_strategy_is_used() {
        let mut m = module(Some(Box::new(FixedInflation {
            rate: Dec::with_prec(1, 1).unwrap(),
        })));
        let mut store = KvStore::in_memory().unwrap();
        let bz = m.default_genesis().unwrap();
        m.init_genesis(&mut Context::new(0, &mut store), &bz).unwrap();

        let out = m.begin_block(&mut Context::new(1, &mut store)).unwrap();
        assert_eq!(out.minter.inflation, Dec::with_prec(1, 1).unwrap());
    }

    #[test]
    fn test_out_of_bounds_strategy_still_exports_valid_genesis() {
        let mut m = module(Some(Box::new(FixedInflation {
            rate: Dec::with_prec(5, 1).unwrap(),
        })));
        let mut store = KvStore::in_memory().unwrap();
        let bz = m.default_genesis().unwrap();
        m.init_genesis(&mut Context::new(0, &mut store), &bz).unwrap();
        m.begin_block(&mut Context::new(1, &mut store)).unwrap();

        let exported = m.export_genesis(&store).unwrap();
        m.validate_genesis(&exported).unwrap();
        let genesis: GenesisState = serde_json::from_slice(&exported).unwrap();
        assert_eq!(genesis.minter.inflation, genesis.params.inflation_max);
    }
}
