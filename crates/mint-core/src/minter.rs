use mint_math::Dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mutable mint state, rewritten once per block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minter {
    /// Current annual inflation rate.
    pub inflation: Dec,
    /// Tokens expected to be minted over the next year at current rate and supply.
    pub annual_provisions: Dec,
}

impl Minter {
    pub fn new(inflation: Dec, annual_provisions: Dec) -> Self {
        Self {
            inflation,
            annual_provisions,
        }
    }

    /// Minter at the given rate with nothing provisioned yet.
    pub fn initial(inflation: Dec) -> Self {
        Self::new(inflation, Dec::zero())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inflation.is_negative() {
            return Err(ValidationError::Negative {
                param: "inflation",
                value: self.inflation.clone(),
            });
        }
        if self.annual_provisions.is_negative() {
            return Err(ValidationError::Negative {
                param: "annual_provisions",
                value: self.annual_provisions.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Minter {
    fn default() -> Self {
        Self::initial(Dec::percent(13))
    }
}
