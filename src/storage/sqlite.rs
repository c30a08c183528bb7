//! SQLite-backed ledger store
//!
//! Amounts are stored as TEXT with two fraction digits and parsed back into
//! `Money` on read.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, Money, NewExpense};

use super::init::{initialize_schema, DEFAULT_BUDGET_KEY};
use super::{ExpenseRecord, LedgerStore};

/// Ledger store over a single SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            LedgerError::StorageWriteFailure(format!(
                "Could not open database {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            LedgerError::StorageWriteFailure(format!("Could not open in-memory database: {}", e))
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> LedgerResult<Self> {
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting any error from the final flush
    pub fn close(self) -> LedgerResult<()> {
        self.conn.close().map_err(|(_, e)| {
            LedgerError::StorageWriteFailure(format!("Could not close database: {}", e))
        })
    }

    fn read_amount(&self, key: &str) -> LedgerResult<Option<String>> {
        let amount: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT amount FROM budget WHERE date = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| {
                LedgerError::StorageReadFailure(format!("Could not query budget {}: {}", key, e))
            })?;

        Ok(amount.flatten())
    }
}

/// Raw column values; the amount is validated after the row is read
struct ExpenseRow {
    id: i64,
    name: Option<String>,
    category: Option<String>,
    date: Option<String>,
    /// Older files may hold REAL or INTEGER amounts, so take whatever is there
    amount: Value,
}

impl ExpenseRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            date: row.get(3)?,
            amount: row.get(4)?,
        })
    }

    fn into_record(self) -> ExpenseRecord {
        let raw_amount = match self.amount {
            Value::Text(text) => text,
            Value::Integer(n) => n.to_string(),
            Value::Real(x) => x.to_string(),
            Value::Null | Value::Blob(_) => String::new(),
        };

        let (amount, unreadable_amount) = match Money::parse(&raw_amount) {
            Ok(amount) => (amount, None),
            Err(_) => (Money::zero(), Some(raw_amount)),
        };

        ExpenseRecord {
            expense: Expense {
                id: ExpenseId::new(self.id),
                name: self.name.unwrap_or_default(),
                category: self.category.unwrap_or_default(),
                date: self.date.unwrap_or_default(),
                amount,
            },
            unreadable_amount,
        }
    }
}

impl LedgerStore for SqliteStore {
    fn insert_expense(&self, expense: &NewExpense) -> LedgerResult<ExpenseId> {
        self.conn
            .execute(
                "INSERT INTO expenses (name, category, date, amount) VALUES (?1, ?2, ?3, ?4)",
                params![
                    expense.name,
                    expense.category,
                    expense.date,
                    expense.amount.to_string()
                ],
            )
            .map_err(|e| {
                LedgerError::StorageWriteFailure(format!("Could not insert expense: {}", e))
            })?;

        Ok(ExpenseId::new(self.conn.last_insert_rowid()))
    }

    fn delete_expense(&self, id: ExpenseId) -> LedgerResult<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.get()])
            .map_err(|e| {
                LedgerError::StorageWriteFailure(format!("Could not delete expense {}: {}", id, e))
            })?;
        Ok(())
    }

    fn expense_records_for_year_month(
        &self,
        year_month: &str,
    ) -> LedgerResult<Vec<ExpenseRecord>> {
        let read_failure =
            |e: rusqlite::Error| LedgerError::StorageReadFailure(format!("Could not query expenses: {}", e));

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, category, date, amount FROM expenses \
                 WHERE instr(date, ?1) > 0 ORDER BY id",
            )
            .map_err(read_failure)?;

        let rows = stmt
            .query_map(params![year_month], ExpenseRow::from_row)
            .map_err(read_failure)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(read_failure)?.into_record());
        }

        Ok(records)
    }

    fn budget(&self, key: &str) -> LedgerResult<Option<String>> {
        self.read_amount(key)
    }

    fn upsert_budget(&self, amount: &str, key: &str) -> LedgerResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO budget (amount, date) VALUES (?1, ?2)",
                params![amount, key],
            )
            .map_err(|e| {
                LedgerError::StorageWriteFailure(format!("Could not save budget {}: {}", key, e))
            })?;
        Ok(())
    }

    fn set_default_budget(&self, amount: &str) -> LedgerResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE budget SET amount = ?1 WHERE date = ?2",
                params![amount, DEFAULT_BUDGET_KEY],
            )
            .map_err(|e| {
                LedgerError::StorageWriteFailure(format!("Could not update default budget: {}", e))
            })?;

        if changed == 0 {
            return Err(LedgerError::StorageWriteFailure(
                "Default budget row is missing".into(),
            ));
        }

        Ok(())
    }
}
