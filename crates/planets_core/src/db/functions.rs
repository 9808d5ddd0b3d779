//! Custom SQL functions registered on every planets connection.
//!
//! # Invariants
//! - `unicode_lower` lowercases with `str::to_lowercase`, matching
//!   `PlanetFilter::matches` on every input.

use super::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// SQL name of the Unicode-aware lowercase function.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// Registers the planets SQL functions on `conn`.
///
/// Connections from `open_db`/`open_db_in_memory` already have them.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|value| value.to_lowercase()))
        },
    )?;
    Ok(())
}
