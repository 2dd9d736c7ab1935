use mint_math::Dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::validate_denom;

/// Per-chain mint configuration. Set at genesis; changed only by governance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Denom minted every block.
    pub mint_denom: String,
    /// Maximum annual change in the inflation rate.
    pub inflation_rate_change: Dec,
    /// Upper bound on the inflation rate.
    pub inflation_max: Dec,
    /// Lower bound on the inflation rate.
    pub inflation_min: Dec,
    /// Target fraction of supply that should be bonded.
    pub goal_bonded: Dec,
    /// Expected blocks per year, used to annualize rates.
    pub blocks_per_year: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mint_denom: "stake".to_string(),
            inflation_rate_change: Dec::percent(13), // per year
            inflation_max: Dec::percent(20),
            inflation_min: Dec::percent(7),
            goal_bonded: Dec::percent(67),
            blocks_per_year: 60 * 60 * 8766 / 5, // 5s blocks
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_denom(&self.mint_denom)?;
        validate_fraction("inflation_rate_change", &self.inflation_rate_change)?;
        validate_fraction("inflation_max", &self.inflation_max)?;
        validate_fraction("inflation_min", &self.inflation_min)?;
        validate_fraction("goal_bonded", &self.goal_bonded)?;
        if !self.goal_bonded.is_positive() {
            return Err(ValidationError::NonPositiveGoalBonded(
                self.goal_bonded.clone(),
            ));
        }
        if self.blocks_per_year == 0 {
            return Err(ValidationError::ZeroBlocksPerYear);
        }
        if self.inflation_max < self.inflation_min {
            return Err(ValidationError::InflationBoundsInverted {
                max: self.inflation_max.clone(),
                min: self.inflation_min.clone(),
            });
        }
        Ok(())
    }
}

/// Rates and ratios live in `[0, 1]`.
fn validate_fraction(param: &'static str, value: &Dec) -> Result<(), ValidationError> {
    if value.is_negative() {
        return Err(ValidationError::Negative {
            param,
            value: value.clone(),
        });
    }
    if value > &Dec::one() {
        return Err(ValidationError::TooLarge {
            param,
            value: value.clone(),
        });
    }
    Ok(())
}
