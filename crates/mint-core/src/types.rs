use mint_math::hash::sha256;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Token amount in the smallest indivisible unit of a denom.
pub type Amount = u128;

/// Name of this module and of its holding account.
pub const MODULE_NAME: &str = "mint";

/// Module account that receives every minted coin.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// A ledger account address (hex of the first 20 bytes of a SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(hex_str: &str) -> Self {
        Self(hex_str.to_string())
    }

    /// Deterministic address of a named module account.
    pub fn module(name: &str) -> Self {
        let digest = sha256(name.as_bytes());
        Self(hex::encode(&digest[..20]))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: &str, amount: Amount) -> Self {
        Self {
            denom: denom.to_string(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Denoms match `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), ValidationError> {
    if denom.trim().is_empty() {
        return Err(ValidationError::BlankDenom);
    }
    let mut chars = denom.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !first_ok || !rest_ok || !(3..=128).contains(&denom.len()) {
        return Err(ValidationError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}
