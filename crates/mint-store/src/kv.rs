use mint_core::error::StoreError;
use mint_math::hash::sha256_entry;
use mint_math::Hash256;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::merkle::merkle_root;
use crate::schema::init_schema;

/// Key/value state store backed by SQLite.
///
/// Writes made between [`KvStore::begin_block`] and [`KvStore::commit`] land
/// together or not at all: a savepoint wraps the block and
/// [`KvStore::rollback`] discards it. Each commit records the Merkle root of
/// the full key space as the block's app hash.
pub struct KvStore {
    conn: Connection,
    block_open: bool,
    version: u64,
}

impl KvStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::init(conn)
    }

    /// Create an in-memory store (for tests).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn).map_err(|e| StoreError::Database(e.to_string()))?;
        let version: i64 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM commits", [], |row| {
                row.get(0)
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            conn,
            block_open: false,
            version: version as u64,
        })
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Insert or replace the value under `key`.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// All entries in key order.
    pub fn entries(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM kv ORDER BY key")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let entries: Vec<(Vec<u8>, Vec<u8>)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(entries)
    }

    /// Start buffering writes for one block.
    pub fn begin_block(&mut self) -> Result<(), StoreError> {
        if self.block_open {
            return Err(StoreError::BlockAlreadyOpen);
        }
        self.conn
            .execute_batch("SAVEPOINT block")
            .map_err(|e| StoreError::Database(e.to_string()))?;
        self.block_open = true;
        Ok(())
    }

    /// Make the open block's writes durable and return the new app hash.
    pub fn commit(&mut self) -> Result<Hash256, StoreError> {
        if !self.block_open {
            return Err(StoreError::NoOpenBlock);
        }

        let app_hash = self.app_hash()?;
        let version = self.version + 1;
        self.conn
            .execute(
                "INSERT INTO commits (version, app_hash) VALUES (?1, ?2)",
                rusqlite::params![version as i64, hex::encode(app_hash)],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        self.conn
            .execute_batch("RELEASE block")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        self.block_open = false;
        self.version = version;
        debug!(target: "mint::store", version, app_hash = %hex::encode(app_hash), "committed");
        Ok(app_hash)
    }

    /// Discard every write since [`KvStore::begin_block`].
    pub fn rollback(&mut self) -> Result<(), StoreError> {
        if !self.block_open {
            return Err(StoreError::NoOpenBlock);
        }
        self.conn
            .execute_batch("ROLLBACK TO block; RELEASE block")
            .map_err(|e| StoreError::Database(e.to_string()))?;
        self.block_open = false;
        debug!(target: "mint::store", version = self.version, "rolled back open block");
        Ok(())
    }

    /// Number of committed blocks.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// App hash recorded for a committed version.
    pub fn committed_hash(&self, version: u64) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row(
                "SELECT app_hash FROM commits WHERE version = ?1",
                [version as i64],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Merkle root over every entry in key order.
    pub fn app_hash(&self) -> Result<Hash256, StoreError> {
        let leaves: Vec<Hash256> = self
            .entries()?
            .iter()
            .map(|(k, v)| sha256_entry(k, v))
            .collect();
        Ok(merkle_root(&leaves))
    }
}
