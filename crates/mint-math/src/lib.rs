//! Deterministic arithmetic and hashing shared by every replica.

pub mod dec;
pub mod hash;

pub use dec::Dec;

use thiserror::Error;

/// SHA-256 hash as a 32-byte array.
pub type Hash256 = [u8; 32];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid decimal string: {0:?}")]
    InvalidDecimal(String),
    #[error("too many decimal places in {0:?} (max 18)")]
    TooPrecise(String),
    #[error("cannot convert negative value {0} to an amount")]
    NegativeAmount(String),
    #[error("value {0} does not fit in an amount")]
    Overflow(String),
}
