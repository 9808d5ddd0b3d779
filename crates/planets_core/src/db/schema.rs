//! Schema bootstrap for the `planets` table.
//!
//! # Responsibility
//! - Create the single application table on first open.
//! - Refuse databases written by a newer schema.
//!
//! # Invariants
//! - Bootstrap is idempotent.
//! - Schema version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

/// Creates the `planets` table when missing and records the schema version.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
