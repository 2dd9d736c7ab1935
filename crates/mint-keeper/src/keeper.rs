use mint_core::error::{LedgerError, MintError, StoreError};
use mint_core::genesis::GenesisState;
use mint_core::minter::Minter;
use mint_core::params::Params;
use mint_core::types::{Amount, Coin, FEE_COLLECTOR_NAME, MODULE_NAME};
use mint_ledger::{BankKeeper, StakingKeeper};
use mint_math::Dec;
use mint_store::KvStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::context::Context;
use crate::events::{
    Event, ATTRIBUTE_KEY_AMOUNT, ATTRIBUTE_KEY_ANNUAL_PROVISIONS, ATTRIBUTE_KEY_BONDED_RATIO,
    ATTRIBUTE_KEY_INFLATION, EVENT_TYPE_MINT,
};
use crate::strategy::{DefaultInflation, InflationStrategy};

/// Store key of the persisted [`Minter`].
pub const MINTER_KEY: &[u8] = &[0x00];
/// Store key of the persisted [`Params`].
pub const PARAMS_KEY: &[u8] = &[0x01];

/// Module accounts the keeper mints into and pays out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeeperConfig {
    pub mint_module: String,
    pub fee_collector: String,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            mint_module: MODULE_NAME.to_string(),
            fee_collector: FEE_COLLECTOR_NAME.to_string(),
        }
    }
}

/// Outcome of one `begin_block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMint {
    pub bonded_ratio: Dec,
    pub minter: Minter,
    /// Coins minted and forwarded to the fee collector. Zero means nothing
    /// touched the ledger.
    pub minted: Coin,
}

/// Supply controller: owns the persisted minter and params, and drives the
/// bank through one mint per block.
pub struct Keeper<B, S> {
    config: KeeperConfig,
    bank: B,
    staking: S,
    strategy: Box<dyn InflationStrategy>,
}

impl<B: BankKeeper, S: StakingKeeper> Keeper<B, S> {
    pub fn new(
        config: KeeperConfig,
        bank: B,
        staking: S,
        strategy: Box<dyn InflationStrategy>,
    ) -> Self {
        Self {
            config,
            bank,
            staking,
            strategy,
        }
    }

    pub fn with_default_strategy(config: KeeperConfig, bank: B, staking: S) -> Self {
        Self::new(config, bank, staking, Box::new(DefaultInflation))
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn staking(&self) -> &S {
        &self.staking
    }

    pub fn staking_mut(&mut self) -> &mut S {
        &mut self.staking
    }

    pub fn minter(&self, store: &KvStore) -> Result<Minter, MintError> {
        load(store, MINTER_KEY, "minter")
    }

    pub fn set_minter(&self, store: &mut KvStore, minter: &Minter) -> Result<(), MintError> {
        save(store, MINTER_KEY, "minter", minter)
    }

    pub fn params(&self, store: &KvStore) -> Result<Params, MintError> {
        load(store, PARAMS_KEY, "params")
    }

    pub fn set_params(&self, store: &mut KvStore, params: &Params) -> Result<(), MintError> {
        save(store, PARAMS_KEY, "params", params)
    }

    /// `bonded / total_supply` truncated at the 18th digit, or zero when
    /// nothing is in supply.
    pub fn bonded_ratio(&self, total_supply: Amount) -> Result<Dec, MintError> {
        if total_supply == 0 {
            return Ok(Dec::zero());
        }
        let bonded = Dec::from_amount(self.staking.total_bonded_tokens());
        Ok(bonded.quo_amount(total_supply)?)
    }

    /// Recompute inflation, persist the minter, then mint this block's
    /// provision and forward all of it to the fee collector.
    ///
    /// Whatever rate the strategy returns is held to
    /// `[inflation_min, inflation_max]` before it is stored.
    ///
    /// Any error leaves the block half-applied in the store and bank; the
    /// caller must discard the block (see [`crate::abci::BlockExecutor`]).
    pub fn begin_block(&mut self, ctx: &mut Context<'_>) -> Result<BlockMint, MintError> {
        let mut minter = self.minter(ctx.store())?;
        let params = self.params(ctx.store())?;

        let total_supply = self.bank.get_supply(&params.mint_denom);
        let bonded_ratio = self.bonded_ratio(total_supply)?;

        minter.inflation = self
            .strategy
            .next_inflation_rate(&minter.inflation, &bonded_ratio, &params)?
            .clamp_to(&params.inflation_min, &params.inflation_max);
        minter.annual_provisions = self
            .strategy
            .next_annual_provisions(&minter.inflation, total_supply);
        self.set_minter(ctx.store_mut(), &minter)?;

        let amount = self
            .strategy
            .block_provision(&minter.annual_provisions, params.blocks_per_year)?;
        let minted = Coin::new(&params.mint_denom, amount);

        if minted.is_zero() {
            debug!(target: "mint", height = ctx.block_height(), "block provision is zero, skipping mint");
        } else {
            self.bank.mint_coins(&self.config.mint_module, &minted)?;
            self.bank.send_coins_from_module_to_module(
                &self.config.mint_module,
                &self.config.fee_collector,
                &minted,
            )?;
        }

        ctx.emit(
            Event::new(EVENT_TYPE_MINT)
                .with_attribute(ATTRIBUTE_KEY_BONDED_RATIO, &bonded_ratio)
                .with_attribute(ATTRIBUTE_KEY_INFLATION, &minter.inflation)
                .with_attribute(ATTRIBUTE_KEY_ANNUAL_PROVISIONS, &minter.annual_provisions)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, amount),
        );
        info!(
            target: "mint",
            height = ctx.block_height(),
            inflation = %minter.inflation,
            bonded_ratio = %bonded_ratio,
            minted = %minted,
            "minted block provision"
        );

        Ok(BlockMint {
            bonded_ratio,
            minter,
            minted,
        })
    }

    /// Validate and persist genesis. Nothing is minted.
    pub fn init_genesis(
        &mut self,
        ctx: &mut Context<'_>,
        genesis: &GenesisState,
    ) -> Result<(), MintError> {
        genesis.validate()?;
        self.require_module_accounts()?;

        self.set_minter(ctx.store_mut(), &genesis.minter)?;
        self.set_params(ctx.store_mut(), &genesis.params)?;
        debug!(
            target: "mint",
            height = ctx.block_height(),
            denom = %genesis.params.mint_denom,
            inflation = %genesis.minter.inflation,
            "initialized mint genesis"
        );
        Ok(())
    }

    /// Current minter and params, exactly as stored.
    pub fn export_genesis(&self, store: &KvStore) -> Result<GenesisState, MintError> {
        Ok(GenesisState::new(self.minter(store)?, self.params(store)?))
    }

    fn require_module_accounts(&self) -> Result<(), MintError> {
        for name in [&self.config.mint_module, &self.config.fee_collector] {
            if !self.bank.has_module_account(name) {
                return Err(LedgerError::UnknownModuleAccount(name.clone()).into());
            }
        }
        Ok(())
    }
}

fn load<T: DeserializeOwned>(store: &KvStore, key: &[u8], what: &'static str) -> Result<T, MintError> {
    let bytes = store.get(key)?.ok_or(MintError::MissingState(what))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        StoreError::Codec {
            key: what.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn save<T: Serialize>(
    store: &mut KvStore,
    key: &[u8],
    what: &'static str,
    value: &T,
) -> Result<(), MintError> {
    let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Codec {
        key: what.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &bytes)?;
    Ok(())
}
