use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::MathError;

/// Number of decimal places carried by every [`Dec`].
pub const PRECISION: usize = 18;

const PRECISION_MULTIPLIER: u64 = 1_000_000_000_000_000_000;

fn precision_multiplier() -> BigInt {
    BigInt::from(PRECISION_MULTIPLIER)
}

/// Signed fixed-point decimal with 18 fractional digits.
///
/// The value is stored as an integer scaled by 10^18. Multiplication and
/// division round half-to-even at the last digit; integer division and
/// conversion back to an integer amount truncate toward zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec {
    i: BigInt,
}

impl Dec {
    pub fn zero() -> Self {
        Self { i: BigInt::zero() }
    }

    pub fn one() -> Self {
        Self {
            i: precision_multiplier(),
        }
    }

    /// Whole number `v`.
    pub fn from_int(v: i64) -> Self {
        Self {
            i: BigInt::from(v) * precision_multiplier(),
        }
    }

    /// Whole token amount `v`.
    pub fn from_amount(v: u128) -> Self {
        Self {
            i: BigInt::from(v) * precision_multiplier(),
        }
    }

    /// `v` percent, e.g. `percent(13)` is `0.13`.
    pub fn percent(v: i64) -> Self {
        Self {
            i: BigInt::from(v) * BigInt::from(PRECISION_MULTIPLIER / 100),
        }
    }

    /// `v * 10^-prec`, e.g. `with_prec(13, 2)` is `0.13`.
    pub fn with_prec(v: i64, prec: u32) -> Result<Self, MathError> {
        if prec as usize > PRECISION {
            return Err(MathError::TooPrecise(format!("{v}e-{prec}")));
        }
        let scale = BigInt::from(10u64).pow(PRECISION as u32 - prec);
        Ok(Self {
            i: BigInt::from(v) * scale,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.i.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.i.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.i.is_positive()
    }

    /// Quotient with half-to-even rounding at the 18th digit.
    pub fn quo(&self, rhs: &Dec) -> Result<Dec, MathError> {
        if rhs.i.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let scaled = &self.i * precision_multiplier() * precision_multiplier();
        Ok(Self {
            i: chop_precision_and_round(scaled / &rhs.i),
        })
    }

    /// Quotient by a whole number, truncated toward zero.
    pub fn quo_int(&self, rhs: u64) -> Result<Dec, MathError> {
        if rhs == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self {
            i: &self.i / BigInt::from(rhs),
        })
    }

    /// Quotient by a whole token amount, truncated toward zero.
    pub fn quo_amount(&self, rhs: u128) -> Result<Dec, MathError> {
        if rhs == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self {
            i: &self.i / BigInt::from(rhs),
        })
    }

    /// Product with a whole token amount. Exact, no rounding.
    pub fn mul_amount(&self, rhs: u128) -> Dec {
        Self {
            i: &self.i * BigInt::from(rhs),
        }
    }

    /// Integer part, truncated toward zero, as a token amount.
    pub fn truncate_amount(&self) -> Result<u128, MathError> {
        if self.i.is_negative() {
            return Err(MathError::NegativeAmount(self.to_string()));
        }
        (&self.i / precision_multiplier())
            .to_u128()
            .ok_or_else(|| MathError::Overflow(self.to_string()))
    }

    /// Clamp into `[min, max]`. `min` wins when the bounds are inverted.
    pub fn clamp_to(self, min: &Dec, max: &Dec) -> Dec {
        if &self > max {
            if max < min {
                return min.clone();
            }
            return max.clone();
        }
        if &self < min {
            return min.clone();
        }
        self
    }
}

/// Drop the last 18 digits of `d`, rounding half to even.
fn chop_precision_and_round(d: BigInt) -> BigInt {
    if d.is_negative() {
        return -chop_precision_and_round(-d);
    }

    let p = precision_multiplier();
    let quo = &d / &p;
    let rem = &d % &p;
    if rem.is_zero() {
        return quo;
    }

    let half = &p / BigInt::from(2u8);
    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + BigInt::one(),
        Ordering::Equal => {
            if (&quo % BigInt::from(2u8)).is_zero() {
                quo
            } else {
                quo + BigInt::one()
            }
        }
    }
}

impl Add for Dec {
    type Output = Dec;
    fn add(self, rhs: Self) -> Dec {
        Dec { i: self.i + rhs.i }
    }
}

impl Add for &Dec {
    type Output = Dec;
    fn add(self, rhs: Self) -> Dec {
        Dec { i: &self.i + &rhs.i }
    }
}

impl Sub for Dec {
    type Output = Dec;
    fn sub(self, rhs: Self) -> Dec {
        Dec { i: self.i - rhs.i }
    }
}

impl Sub for &Dec {
    type Output = Dec;
    fn sub(self, rhs: Self) -> Dec {
        Dec { i: &self.i - &rhs.i }
    }
}

impl Mul for Dec {
    type Output = Dec;
    fn mul(self, rhs: Self) -> Dec {
        &self * &rhs
    }
}

impl Mul for &Dec {
    type Output = Dec;
    fn mul(self, rhs: Self) -> Dec {
        Dec {
            i: chop_precision_and_round(&self.i * &rhs.i),
        }
    }
}

impl Neg for Dec {
    type Output = Dec;
    fn neg(self) -> Dec {
        Dec { i: -self.i }
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.i.magnitude().to_string();
        let (int_part, frac_part) = if digits.len() > PRECISION {
            let split = digits.len() - PRECISION;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            ("0".to_string(), format!("{digits:0>width$}", width = PRECISION))
        };
        let sign = if self.i.is_negative() { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl FromStr for Dec {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MathError::InvalidDecimal(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() || (body.contains('.') && frac_part.is_empty()) {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION {
            return Err(MathError::TooPrecise(s.to_string()));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let combined = format!("{int_part}{frac_part:0<width$}", width = PRECISION);
        let mut i = BigInt::from_str(&combined).map_err(|_| invalid())?;
        if negative {
            i = -i;
        }
        Ok(Self { i })
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Dec::from_str(&s).map_err(serde::de::Error::custom)
    }
}
