//! Storage initialization
//!
//! Creates the tables and seeds the default budget row. Every statement is
//! create-if-missing or insert-or-ignore, so running this against an existing
//! database changes nothing.

use rusqlite::{params, Connection};

use crate::error::{LedgerError, LedgerResult};

/// Budget key holding the fallback amount
pub const DEFAULT_BUDGET_KEY: &str = "default";

/// Amount seeded into the default row on first open
pub const DEFAULT_BUDGET_AMOUNT: &str = "0.00";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY,
    name TEXT,
    category TEXT,
    date TEXT,
    amount TEXT
);
CREATE TABLE IF NOT EXISTS budget (
    id INTEGER PRIMARY KEY,
    date TEXT UNIQUE,
    amount TEXT
);
";

/// Ensure both tables and the default budget row exist
pub fn initialize_schema(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| LedgerError::StorageWriteFailure(format!("Could not create tables: {}", e)))?;

    conn.execute(
        "INSERT OR IGNORE INTO budget (date, amount) VALUES (?1, ?2)",
        params![DEFAULT_BUDGET_KEY, DEFAULT_BUDGET_AMOUNT],
    )
    .map_err(|e| {
        LedgerError::StorageWriteFailure(format!("Could not seed default budget: {}", e))
    })?;

    Ok(())
}
