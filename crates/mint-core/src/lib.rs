pub mod error;
pub mod genesis;
pub mod minter;
pub mod params;
pub mod types;

pub use mint_math::Dec;
