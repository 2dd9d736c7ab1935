use mint_core::error::MintError;
use mint_ledger::{BankKeeper, StakingKeeper};
use mint_math::Hash256;
use mint_store::KvStore;
use tracing::{error, info, warn};

use crate::context::Context;
use crate::events::Event;
use crate::keeper::BlockMint;
use crate::module::AppModule;
use crate::query::QueryServer;

/// Result of one committed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub height: u64,
    pub mint: BlockMint,
    pub events: Vec<Event>,
    pub app_hash: Hash256,
}

/// Drives the mint module block by block with all-or-nothing semantics.
///
/// Store writes are wrapped in a savepoint and the bank is checkpointed by
/// cloning before the hook runs. If the hook fails both are restored, so an
/// aborted block leaves no trace and the height does not advance.
pub struct BlockExecutor<B, S> {
    module: AppModule<B, S>,
    store: KvStore,
    height: u64,
}

impl<B: BankKeeper + Clone, S: StakingKeeper> BlockExecutor<B, S> {
    pub fn new(module: AppModule<B, S>, store: KvStore) -> Self {
        Self {
            module,
            store,
            height: 0,
        }
    }

    /// Apply the genesis document and commit it as the first version.
    pub fn init_chain(&mut self, genesis: &[u8]) -> Result<Hash256, MintError> {
        self.store.begin_block()?;
        let result = {
            let mut ctx = Context::new(self.height, &mut self.store);
            self.module.init_genesis(&mut ctx, genesis)
        };

        if let Err(e) = result {
            self.discard(None);
            return Err(e);
        }
        let app_hash = match self.store.commit() {
            Ok(hash) => hash,
            Err(e) => {
                self.discard(None);
                return Err(e.into());
            }
        };
        info!(target: "mint", app_hash = %hex::encode(app_hash), "genesis committed");
        Ok(app_hash)
    }

    /// Run the mint hook for the next height and commit it.
    pub fn begin_block(&mut self) -> Result<BlockOutcome, MintError> {
        let height = self.height + 1;
        self.store.begin_block()?;
        let checkpoint = self.module.keeper().bank().clone();

        let result = {
            let mut ctx = Context::new(height, &mut self.store);
            self.module
                .begin_block(&mut ctx)
                .map(|mint| (mint, ctx.into_events()))
        };

        let (mint, events) = match result {
            Ok(out) => out,
            Err(e) => {
                warn!(target: "mint", height, error = %e, "block aborted");
                self.discard(Some(checkpoint));
                return Err(e);
            }
        };

        let app_hash = match self.store.commit() {
            Ok(hash) => hash,
            Err(e) => {
                self.discard(Some(checkpoint));
                return Err(e.into());
            }
        };
        self.height = height;

        Ok(BlockOutcome {
            height,
            mint,
            events,
            app_hash,
        })
    }

    /// Answer a path-based query against committed state.
    pub fn query(&self, path: &str) -> Result<Vec<u8>, MintError> {
        self.module.keeper().route(path, &self.store)
    }

    /// Export the current mint genesis as JSON.
    pub fn export_genesis(&self) -> Result<Vec<u8>, MintError> {
        self.module.export_genesis(&self.store)
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn module(&self) -> &AppModule<B, S> {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut AppModule<B, S> {
        &mut self.module
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    fn discard(&mut self, checkpoint: Option<B>) {
        if let Some(bank) = checkpoint {
            *self.module.keeper_mut().bank_mut() = bank;
        }
        if let Err(e) = self.store.rollback() {
            error!(target: "mint", error = %e, "failed to roll back block");
        }
    }
}
