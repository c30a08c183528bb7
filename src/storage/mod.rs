//! Storage layer for the expense tracker
//!
//! [`LedgerStore`] is the only way in or out of durable state. `SqliteStore`
//! is the production backend and keeps the `expenses` / `budget` table layout
//! of existing `db.sqlite3` files. `MemoryStore` offers the same behaviour
//! without a database.
//!
//! Neither backend coordinates concurrent writers; callers drive a store from
//! one thread at a time.

pub mod init;
pub mod memory;
pub mod sqlite;

pub use init::{initialize_schema, DEFAULT_BUDGET_AMOUNT, DEFAULT_BUDGET_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::LedgerResult;
use crate::models::{Expense, ExpenseId, NewExpense};

/// An expense as read back, plus the stored amount text when it did not parse
///
/// Rows with an unreadable amount are kept with a zero amount so the rest of
/// the month stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub expense: Expense,
    pub unreadable_amount: Option<String>,
}

impl ExpenseRecord {
    pub fn readable(expense: Expense) -> Self {
        Self {
            expense,
            unreadable_amount: None,
        }
    }
}

/// Persistence operations for expenses and budgets
pub trait LedgerStore {
    /// Append an expense and return the id the store assigned
    ///
    /// Fields are stored as given; validation is the caller's job.
    fn insert_expense(&self, expense: &NewExpense) -> LedgerResult<ExpenseId>;

    /// Remove an expense. Unknown ids are not an error.
    fn delete_expense(&self, id: ExpenseId) -> LedgerResult<()>;

    /// All expenses whose date contains `year_month`, in insertion order
    ///
    /// This is a substring match on the stored text, not a date comparison, so
    /// rows with malformed dates can be picked up by (or hidden from) the
    /// wrong month. A row whose amount cannot be parsed is still returned;
    /// only a failed query is an error.
    fn expense_records_for_year_month(
        &self,
        year_month: &str,
    ) -> LedgerResult<Vec<ExpenseRecord>>;

    /// Same rows as [`LedgerStore::expense_records_for_year_month`], without
    /// the unreadable-amount detail
    fn expenses_for_year_month(&self, year_month: &str) -> LedgerResult<Vec<Expense>> {
        Ok(self
            .expense_records_for_year_month(year_month)?
            .into_iter()
            .map(|record| record.expense)
            .collect())
    }

    /// Stored amount for a budget key, `None` when there is no row
    fn budget(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Stored default amount; present on any initialized store
    fn default_budget(&self) -> LedgerResult<Option<String>> {
        self.budget(DEFAULT_BUDGET_KEY)
    }

    /// Insert or replace the budget row for `key`
    fn upsert_budget(&self, amount: &str, key: &str) -> LedgerResult<()>;

    /// Update the default row in place
    fn set_default_budget(&self, amount: &str) -> LedgerResult<()>;
}
