use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::minter::Minter;
use crate::params::Params;

/// Mint module genesis document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisState {
    pub minter: Minter,
    pub params: Params,
}

impl GenesisState {
    pub fn new(minter: Minter, params: Params) -> Self {
        Self { minter, params }
    }

    /// Checks params, minter fields, and that the starting inflation sits
    /// inside the configured bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.validate()?;
        self.minter.validate()?;

        let p = &self.params;
        if self.minter.inflation < p.inflation_min || self.minter.inflation > p.inflation_max {
            return Err(ValidationError::InflationOutOfBounds {
                inflation: self.minter.inflation.clone(),
                min: p.inflation_min.clone(),
                max: p.inflation_max.clone(),
            });
        }
        Ok(())
    }
}
