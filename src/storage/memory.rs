//! In-memory ledger store
//!
//! Behaves like `SqliteStore` (seeded default row, substring month match,
//! insertion-order results) but keeps everything in maps. Nothing survives the
//! process. Used by tests and by embedders that bring their own persistence.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, NewExpense};

use super::init::{DEFAULT_BUDGET_AMOUNT, DEFAULT_BUDGET_KEY};
use super::{ExpenseRecord, LedgerStore};

#[derive(Debug, Default)]
struct ExpenseTable {
    last_id: i64,
    /// Ordered by id, which is also insertion order
    rows: BTreeMap<ExpenseId, Expense>,
}

/// Map-backed ledger store
#[derive(Debug)]
pub struct MemoryStore {
    expenses: RwLock<ExpenseTable>,
    budgets: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut budgets = HashMap::new();
        budgets.insert(
            DEFAULT_BUDGET_KEY.to_string(),
            DEFAULT_BUDGET_AMOUNT.to_string(),
        );

        Self {
            expenses: RwLock::new(ExpenseTable::default()),
            budgets: RwLock::new(budgets),
        }
    }

    /// Number of stored expenses across all months
    pub fn expense_count(&self) -> LedgerResult<usize> {
        let table = self
            .expenses
            .read()
            .map_err(|e| LedgerError::StorageReadFailure(format!("Failed to acquire read lock: {}", e)))?;
        Ok(table.rows.len())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn insert_expense(&self, expense: &NewExpense) -> LedgerResult<ExpenseId> {
        let mut table = self.expenses.write().map_err(|e| {
            LedgerError::StorageWriteFailure(format!("Failed to acquire write lock: {}", e))
        })?;

        table.last_id += 1;
        let id = ExpenseId::new(table.last_id);
        table.rows.insert(id, expense.clone().into_expense(id));
        Ok(id)
    }

    fn delete_expense(&self, id: ExpenseId) -> LedgerResult<()> {
        let mut table = self.expenses.write().map_err(|e| {
            LedgerError::StorageWriteFailure(format!("Failed to acquire write lock: {}", e))
        })?;

        table.rows.remove(&id);
        Ok(())
    }

    fn expense_records_for_year_month(
        &self,
        year_month: &str,
    ) -> LedgerResult<Vec<ExpenseRecord>> {
        let table = self.expenses.read().map_err(|e| {
            LedgerError::StorageReadFailure(format!("Failed to acquire read lock: {}", e))
        })?;

        // amounts are held as Money, so every row is readable
        Ok(table
            .rows
            .values()
            .filter(|e| e.date.contains(year_month))
            .cloned()
            .map(ExpenseRecord::readable)
            .collect())
    }

    fn budget(&self, key: &str) -> LedgerResult<Option<String>> {
        let budgets = self.budgets.read().map_err(|e| {
            LedgerError::StorageReadFailure(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(budgets.get(key).cloned())
    }

    fn upsert_budget(&self, amount: &str, key: &str) -> LedgerResult<()> {
        let mut budgets = self.budgets.write().map_err(|e| {
            LedgerError::StorageWriteFailure(format!("Failed to acquire write lock: {}", e))
        })?;

        budgets.insert(key.to_string(), amount.to_string());
        Ok(())
    }

    fn set_default_budget(&self, amount: &str) -> LedgerResult<()> {
        let mut budgets = self.budgets.write().map_err(|e| {
            LedgerError::StorageWriteFailure(format!("Failed to acquire write lock: {}", e))
        })?;

        match budgets.get_mut(DEFAULT_BUDGET_KEY) {
            Some(value) => {
                *value = amount.to_string();
                Ok(())
            }
            None => Err(LedgerError::StorageWriteFailure(
                "Default budget row is missing".into(),
            )),
        }
    }
}
