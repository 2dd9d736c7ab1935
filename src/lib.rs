// Root crate re-exports for integration tests.
pub use mint_core;
pub use mint_keeper;
pub use mint_ledger;
pub use mint_math;
pub use mint_store;
