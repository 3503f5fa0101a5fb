//! A persistent key-value store backed by a single SQLite table.
//!
//! Each key holds one text value which is overwritten in full on every write.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Initialize the key-value table.
pub fn create_local_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `None` if nothing has been stored yet.
pub fn get_item(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .prepare("SELECT value FROM local_storage WHERE key = :key;")?
        .query_row(&[(":key", &key)], |row| row.get(0))
        .optional()
        .map_err(|error| error.into())
}

/// Store `value` under `key`, replacing any previous value.
pub fn set_item(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        (key, value),
    )?;

    Ok(())
}
