use mint_core::error::MintError;
use mint_core::params::Params;
use mint_ledger::{BankKeeper, StakingKeeper};
use mint_math::Dec;
use mint_store::KvStore;
use serde::{Deserialize, Serialize};

use crate::keeper::Keeper;

pub const QUERY_PARAMS: &str = "parameters";
pub const QUERY_INFLATION: &str = "inflation";
pub const QUERY_ANNUAL_PROVISIONS: &str = "annual_provisions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsResponse {
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInflationResponse {
    pub inflation: Dec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnnualProvisionsResponse {
    pub annual_provisions: Dec,
}

/// Read-only views over the persisted mint state.
pub trait QueryServer {
    fn query_params(&self, store: &KvStore) -> Result<QueryParamsResponse, MintError>;

    fn query_inflation(&self, store: &KvStore) -> Result<QueryInflationResponse, MintError>;

    fn query_annual_provisions(
        &self,
        store: &KvStore,
    ) -> Result<QueryAnnualProvisionsResponse, MintError>;

    /// Dispatch a path-based query and return the JSON response body.
    fn route(&self, path: &str, store: &KvStore) -> Result<Vec<u8>, MintError> {
        let body = match path {
            QUERY_PARAMS => serde_json::to_vec(&self.query_params(store)?),
            QUERY_INFLATION => serde_json::to_vec(&self.query_inflation(store)?),
            QUERY_ANNUAL_PROVISIONS => serde_json::to_vec(&self.query_annual_provisions(store)?),
            other => return Err(MintError::UnknownQuery(other.to_string())),
        };
        body.map_err(|e| MintError::Encode(e.to_string()))
    }
}

impl<B: BankKeeper, S: StakingKeeper> QueryServer for Keeper<B, S> {
    fn query_params(&self, store: &KvStore) -> Result<QueryParamsResponse, MintError> {
        Ok(QueryParamsResponse {
            params: self.params(store)?,
        })
    }

    fn query_inflation(&self, store: &KvStore) -> Result<QueryInflationResponse, MintError> {
        Ok(QueryInflationResponse {
            inflation: self.minter(store)?.inflation,
        })
    }

    fn query_annual_provisions(
        &self,
        store: &KvStore,
    ) -> Result<QueryAnnualProvisionsResponse, MintError> {
        Ok(QueryAnnualProvisionsResponse {
            annual_provisions: self.minter(store)?.annual_provisions,
        })
    }
}
