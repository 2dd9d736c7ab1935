use rusqlite::Connection;

/// Initialize the state store schema.
pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key     BLOB PRIMARY KEY,
            value   BLOB NOT NULL
        ) WITHOUT ROWID;

        CREATE TABLE IF NOT EXISTS commits (
            version     INTEGER PRIMARY KEY,
            app_hash    TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}
