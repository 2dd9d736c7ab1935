use mint_math::Dec;
use thiserror::Error;

pub use mint_math::MathError;

/// Rejections raised while checking params, minter or genesis data.
/// Raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mint denom cannot be blank")]
    BlankDenom,
    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),
    #[error("{param} cannot be negative: {value}")]
    Negative { param: &'static str, value: Dec },
    #[error("{param} too large: {value} (max 1)")]
    TooLarge { param: &'static str, value: Dec },
    #[error("goal_bonded must be positive: {0}")]
    NonPositiveGoalBonded(Dec),
    #[error("blocks_per_year must be positive")]
    ZeroBlocksPerYear,
    #[error("max inflation ({max}) must be greater than or equal to min inflation ({min})")]
    InflationBoundsInverted { max: Dec, min: Dec },
    #[error("minter inflation {inflation} outside [{min}, {max}]")]
    InflationOutOfBounds { inflation: Dec, min: Dec, max: Dec },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("codec error for key {key}: {reason}")]
    Codec { key: String, reason: String },
    #[error("no block is open")]
    NoOpenBlock,
    #[error("a block is already open")]
    BlockAlreadyOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("module account {0} does not exist")]
    UnknownModuleAccount(String),
    #[error("module account {module} does not have {permission} permissions")]
    MissingPermission { module: String, permission: String },
    #[error("denom {0} is not registered")]
    UnregisteredDenom(String),
    #[error("insufficient {denom} balance in {account}: have {have}, need {need}")]
    InsufficientBalance {
        account: String,
        denom: String,
        have: u128,
        need: u128,
    },
    #[error("invalid coin: {0}")]
    InvalidCoin(String),
    #[error("supply of {0} overflows")]
    SupplyOverflow(String),
}

/// Top-level error for block and genesis processing. Every variant aborts
/// the operation in flight.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("{0} not found in store; was mint genesis applied?")]
    MissingState(&'static str),
    #[error("failed to unmarshal mint genesis state: {0}")]
    GenesisDecode(String),
    #[error("failed to marshal mint genesis state: {0}")]
    GenesisEncode(String),
    #[error("failed to encode query response: {0}")]
    Encode(String),
    #[error("unknown mint query endpoint: {0}")]
    UnknownQuery(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Math(#[from] MathError),
}
