use mint_core::error::MathError;
use mint_core::params::Params;
use mint_core::types::Amount;
use mint_math::Dec;

/// Monetary policy evaluated once per block.
///
/// Implementations must be pure: the same inputs always yield the same
/// outputs, with no access to clocks, randomness or stored state. Only
/// [`InflationStrategy::next_inflation_rate`] is required; the provisioning
/// steps default to the standard formulas.
pub trait InflationStrategy {
    /// Inflation for the next block given the current rate and bonded ratio.
    fn next_inflation_rate(
        &self,
        current_inflation: &Dec,
        bonded_ratio: &Dec,
        params: &Params,
    ) -> Result<Dec, MathError>;

    /// `inflation * total_supply`.
    fn next_annual_provisions(&self, inflation: &Dec, total_supply: Amount) -> Dec {
        inflation.mul_amount(total_supply)
    }

    /// `annual_provisions / blocks_per_year`, truncated to whole units. The
    /// fractional remainder is dropped, not carried into the next block.
    fn block_provision(
        &self,
        annual_provisions: &Dec,
        blocks_per_year: u64,
    ) -> Result<Amount, MathError> {
        annual_provisions.quo_int(blocks_per_year)?.truncate_amount()
    }
}

/// Steers inflation toward the bonding goal.
///
/// ```text
/// change/year = (1 - bonded_ratio / goal_bonded) * inflation_rate_change
/// next        = clamp(current + change/year / blocks_per_year, min, max)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInflation;

impl InflationStrategy for DefaultInflation {
    fn next_inflation_rate(
        &self,
        current_inflation: &Dec,
        bonded_ratio: &Dec,
        params: &Params,
    ) -> Result<Dec, MathError> {
        let goal_gap = &Dec::one() - &bonded_ratio.quo(&params.goal_bonded)?;
        let change_per_year = &goal_gap * &params.inflation_rate_change;
        let change = change_per_year.quo(&Dec::from_amount(params.blocks_per_year as u128))?;

        Ok((current_inflation + &change).clamp_to(&params.inflation_min, &params.inflation_max))
    }
}

/// Holds inflation at a fixed rate regardless of bonding, within the
/// configured bounds.
#[derive(Debug, Clone)]
pub struct FixedInflation {
    pub rate: Dec,
}

impl InflationStrategy for FixedInflation {
    fn next_inflation_rate(
        &self,
        _current_inflation: &Dec,
        _bonded_ratio: &Dec,
        params: &Params,
    ) -> Result<Dec, MathError> {
        Ok(self
            .rate
            .clone()
            .clamp_to(&params.inflation_min, &params.inflation_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn next(current: &str, bonded: &str) -> Dec {
        DefaultInflation
            .next_inflation_rate(&d(current), &d(bonded), &Params::default())
            .unwrap()
    }

    #[test]
    fn test_at_goal_unchanged() {
        assert_eq!(next("0.13", "0.67"), d("0.13"));
    }

    #[test]
    fn test_zero_bonded_increases_by_full_step() {
        // (1 - 0) * 0.13 / 6311520
        let step = d("0.13").quo(&Dec::from_amount(6_311_520)).unwrap();
        assert_eq!(next("0.13", "0"), &d("0.13") + &step);
        assert!(next("0.13", "0") > d("0.13"));
    }

    #[test]
    fn test_over_goal_decreases() {
        assert!(next("0.13", "0.9") < d("0.13"));
    }

    #[test]
    fn test_clamped_at_max() {
        assert_eq!(next("0.20", "0"), d("0.20"));
    }

    #[test]
    fn test_clamped_at_min() {
        assert_eq!(next("0.07", "1"), d("0.07"));
    }

    #[test]
    fn test_out_of_range_input_pulled_into_bounds() {
        assert_eq!(next("0.5", "0.67"), d("0.20"));
        assert_eq!(next("0", "0.67"), d("0.07"));
    }

    #[test]
    fn test_annual_provisions() {
        let p = DefaultInflation.next_annual_provisions(&d("0.13"), 1_000_000_000);
        assert_eq!(p, Dec::from_amount(130_000_000));
    }

    #[test]
    fn test_block_provision_truncates() {
        // 130_000_000 / 6_311_520 = 20.597...
        let amount = DefaultInflation
            .block_provision(&Dec::from_amount(130_000_000), 6_311_520)
            .unwrap();
        assert_eq!(amount, 20);
    }

    #[test]
    fn test_block_provision_below_one_unit_is_zero() {
        let amount = DefaultInflation
            .block_provision(&Dec::from_amount(6_311_519), 6_311_520)
            .unwrap();
        assert_eq!(amount, 0);
    }

    #[test]
    fn test_block_provision_zero_blocks_errors() {
        assert_eq!(
            DefaultInflation.block_provision(&Dec::one(), 0),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_fixed_inflation_ignores_bonding() {
        let fixed = FixedInflation { rate: d("0.1") };
        let rate = fixed
            .next_inflation_rate(&d("0.13"), &d("0"), &Params::default())
            .unwrap();
        assert_eq!(rate, d("0.1"));
        // provisioning falls back to the shared formulas
        assert_eq!(fixed.block_provision(&Dec::from_amount(100), 10).unwrap(), 10);
    }

    #[test]
    fn test_fixed_inflation_clamped() {
        let params = Params::default();
        let high = FixedInflation { rate: d("0.5") };
        let low = FixedInflation { rate: d("0.01") };
        assert_eq!(
            high.next_inflation_rate(&d("0.13"), &d("0.67"), &params).unwrap(),
            params.inflation_max
        );
        assert_eq!(
            low.next_inflation_rate(&d("0.13"), &d("0.67"), &params).unwrap(),
            params.inflation_min
        );
    }

    fn bounded_params() -> impl Strategy<Value = Params> {
        (0i64..=1000, 0i64..=1000, 1i64..=1000, 0i64..=1000, 1u64..10_000_000).prop_map(
            |(a, b, goal, change, blocks)| Params {
                inflation_min: Dec::with_prec(a.min(b), 3).unwrap(),
                inflation_max: Dec::with_prec(a.max(b), 3).unwrap(),
                goal_bonded: Dec::with_prec(goal, 3).unwrap(),
                inflation_rate_change: Dec::with_prec(change, 3).unwrap(),
                blocks_per_year: blocks,
                ..Params::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_stays_within_bounds(
            params in bounded_params(),
            start in 0i64..=1000,
            ratios in prop::collection::vec(0i64..=1000, 1..50),
        ) {
            let mut inflation = Dec::with_prec(start, 3).unwrap()
                .clamp_to(&params.inflation_min, &params.inflation_max);
            for r in ratios {
                inflation = DefaultInflation
                    .next_inflation_rate(&inflation, &Dec::with_prec(r, 3).unwrap(), &params)
                    .unwrap();
                prop_assert!(inflation >= params.inflation_min);
                prop_assert!(inflation <= params.inflation_max);
            }
        }

        #[test]
        fn prop_direction_follows_goal(
            params in bounded_params(),
            start in 0i64..=1000,
            ratio in 0i64..=1000,
        ) {
            let current = Dec::with_prec(start, 3).unwrap()
                .clamp_to(&params.inflation_min, &params.inflation_max);
            let bonded = Dec::with_prec(ratio, 3).unwrap();
            let next = DefaultInflation
                .next_inflation_rate(&current, &bonded, &params)
                .unwrap();
            match bonded.cmp(&params.goal_bonded) {
                std::cmp::Ordering::Less => prop_assert!(next >= current),
                std::cmp::Ordering::Greater => prop_assert!(next <= current),
                std::cmp::Ordering::Equal => prop_assert_eq!(next, current),
            }
        }

        #[test]
        fn prop_deterministic(
            params in bounded_params(),
            start in 0i64..=1000,
            ratio in 0i64..=1000,
            supply in 0u64..u64::MAX,
        ) {
            let current = Dec::with_prec(start, 3).unwrap();
            let bonded = Dec::with_prec(ratio, 3).unwrap();
            let run = || {
                let rate = DefaultInflation.next_inflation_rate(&current, &bonded, &params).unwrap();
                let annual = DefaultInflation.next_annual_provisions(&rate, supply as u128);
                let block = DefaultInflation.block_provision(&annual, params.blocks_per_year).unwrap();
                (rate.to_string(), annual.to_string(), block)
            };
            prop_assert_eq!(run(), run());
        }
    }
}
