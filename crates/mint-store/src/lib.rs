//! SQLite-backed key/value state with per-block atomic commits.

pub mod kv;
pub mod merkle;
pub mod schema;

pub use kv::KvStore;
