//! Ledger service
//!
//! Validated writes and the month view. Writes reject bad input before the
//! store is touched. The month view never fails: unreadable rows or budgets are
//! logged and replaced with empty values so there is always something to show.

use crate::error::{LedgerError, LedgerResult};
use crate::logging::Logger;
use crate::models::{normalize, Expense, ExpenseId, Money, MonthData, NewExpense, YearMonth};
use crate::storage::LedgerStore;

const SOURCE: &str = "ledger";

/// Entry point for front ends: every read and write goes through here
pub struct LedgerService<'a> {
    store: &'a dyn LedgerStore,
    logger: &'a Logger,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a dyn LedgerStore, logger: &'a Logger) -> Self {
        Self { store, logger }
    }

    /// Store an expense after normalizing its date
    ///
    /// Date errors come back unchanged and nothing is written. Negative amounts
    /// are rejected as `InvalidAmount`.
    pub fn add_expense(&self, expense: NewExpense) -> LedgerResult<ExpenseId> {
        let date = normalize(&expense.date)?;

        if expense.amount.is_negative() {
            return Err(LedgerError::InvalidAmount(format!(
                "expense amount cannot be negative: {}",
                expense.amount
            )));
        }

        let expense = NewExpense { date, ..expense };
        let id = self
            .store
            .insert_expense(&expense)
            .map_err(|e| self.log_failure(e))?;

        self.logger
            .info_with(SOURCE, format!("Stored expense {}", id), &expense);
        Ok(id)
    }

    /// Delete an expense; unknown ids succeed silently
    pub fn remove_expense(&self, id: ExpenseId) -> LedgerResult<()> {
        self.store
            .delete_expense(id)
            .map_err(|e| self.log_failure(e))?;

        self.logger.info(SOURCE, format!("Removed expense {}", id));
        Ok(())
    }

    /// Set the budget for the month named by `date_text`
    pub fn set_budget_for_month(&self, amount_text: &str, date_text: &str) -> LedgerResult<()> {
        let amount = parse_amount(amount_text)?;
        let key = normalize(date_text)?;
        self.write_month_budget(&amount, &key)
    }

    /// Set the fallback budget used by months without their own
    pub fn set_default_budget(&self, amount_text: &str) -> LedgerResult<()> {
        let amount = parse_amount(amount_text)?;
        self.write_default_budget(&amount)
    }

    /// Set a month's budget and optionally make the same amount the default
    ///
    /// Both inputs are validated before either write happens.
    pub fn set_budget(
        &self,
        amount_text: &str,
        date_text: &str,
        also_default: bool,
    ) -> LedgerResult<()> {
        let amount = parse_amount(amount_text)?;
        let key = normalize(date_text)?;

        self.write_month_budget(&amount, &key)?;
        if also_default {
            self.write_default_budget(&amount)?;
        }
        Ok(())
    }

    /// Build the month view for `year`/`month` (1-12)
    pub fn build_month_data(&self, year: i32, month: u32) -> MonthData {
        let key = format!("{}-{:02}", year, month);

        let expenses = self.load_expenses(&key);

        let budget_text = self.resolve_budget(&key);
        let budget = Money::parse(&budget_text).unwrap_or_else(|_| {
            self.logger.error(
                SOURCE,
                format!("Could not parse budget {:?} for {}, using 0.00", budget_text, key),
            );
            Money::zero()
        });

        let exact = Money::checked_sum(expenses.iter().map(|e| &e.amount))
            .and_then(|total| budget.cents().checked_sub(total.cents()));
        if exact.is_none() {
            self.logger.error(
                SOURCE,
                format!("Totals for {} are out of range, showing clamped figures", key),
            );
        }

        MonthData::new(year, month, expenses, budget)
    }

    /// Expenses for the month; rows with unreadable amounts count as zero
    fn load_expenses(&self, key: &str) -> Vec<Expense> {
        let records = self
            .store
            .expense_records_for_year_month(key)
            .unwrap_or_else(|e| {
                self.logger
                    .error(SOURCE, format!("Could not load expenses for {}: {}", key, e));
                Vec::new()
            });

        records
            .into_iter()
            .map(|record| {
                if let Some(raw) = &record.unreadable_amount {
                    self.logger.warn(
                        SOURCE,
                        format!(
                            "Expense {} has an unreadable amount {:?}, counting it as 0.00",
                            record.expense.id, raw
                        ),
                    );
                }
                record.expense
            })
            .collect()
    }

    /// Same as [`LedgerService::build_month_data`]
    pub fn create_month_view(&self, year: i32, month: u32) -> MonthData {
        self.build_month_data(year, month)
    }

    pub fn month_data(&self, year_month: YearMonth) -> MonthData {
        self.build_month_data(year_month.year(), year_month.month())
    }

    /// Per-month amount if set and non-empty, otherwise the default
    fn resolve_budget(&self, key: &str) -> String {
        let month_budget = self
            .store
            .budget(key)
            .unwrap_or_else(|e| {
                self.logger
                    .error(SOURCE, format!("Could not read budget for {}: {}", key, e));
                None
            })
            .filter(|amount| !amount.is_empty());

        match month_budget {
            Some(amount) => amount,
            None => self
                .store
                .default_budget()
                .unwrap_or_else(|e| {
                    self.logger
                        .error(SOURCE, format!("Could not read default budget: {}", e));
                    None
                })
                .unwrap_or_default(),
        }
    }

    fn write_month_budget(&self, amount: &Money, key: &str) -> LedgerResult<()> {
        self.store
            .upsert_budget(&amount.to_string(), key)
            .map_err(|e| self.log_failure(e))?;

        self.logger
            .info(SOURCE, format!("Budget for {} set to {}", key, amount));
        Ok(())
    }

    fn write_default_budget(&self, amount: &Money) -> LedgerResult<()> {
        self.store
            .set_default_budget(&amount.to_string())
            .map_err(|e| self.log_failure(e))?;

        self.logger
            .info(SOURCE, format!("Default budget set to {}", amount));
        Ok(())
    }

    fn log_failure(&self, err: LedgerError) -> LedgerError {
        self.logger.error(SOURCE, err.to_string());
        err
    }
}

/// Parse user-entered budget text; excess precision is truncated
fn parse_amount(amount_text: &str) -> LedgerResult<Money> {
    Money::parse(amount_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use crate::storage::{ExpenseRecord, MemoryStore, SqliteStore};
    use tempfile::TempDir;

    fn coffee() -> NewExpense {
        NewExpense::new("Coffee", "Food", "2024-03-05", Money::from_cents(450))
    }

    fn rent() -> NewExpense {
        NewExpense::new("Rent", "Home", "2024-03-01", Money::from_cents(120000))
    }

    /// Store whose every call fails, for exercising degraded paths
    struct BrokenStore;

    impl LedgerStore for BrokenStore {
        fn insert_expense(&self, _: &NewExpense) -> LedgerResult<ExpenseId> {
            Err(LedgerError::StorageWriteFailure("disk gone".into()))
        }

        fn delete_expense(&self, _: ExpenseId) -> LedgerResult<()> {
            Err(LedgerError::StorageWriteFailure("disk gone".into()))
        }

        fn expense_records_for_year_month(&self, _: &str) -> LedgerResult<Vec<ExpenseRecord>> {
            Err(LedgerError::StorageReadFailure("disk gone".into()))
        }

        fn budget(&self, _: &str) -> LedgerResult<Option<String>> {
            Err(LedgerError::StorageReadFailure("disk gone".into()))
        }

        fn upsert_budget(&self, _: &str, _: &str) -> LedgerResult<()> {
            Err(LedgerError::StorageWriteFailure("disk gone".into()))
        }

        fn set_default_budget(&self, _: &str) -> LedgerResult<()> {
            Err(LedgerError::StorageWriteFailure("disk gone".into()))
        }
    }

    #[test]
    fn test_add_expense_normalizes_date() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let id = service
            .add_expense(NewExpense::new("Tea", "Food", "2024/3/7", Money::from_cents(300)))
            .unwrap();

        let stored = store.expenses_for_year_month("2024-03").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].date, "2024-03-07");
    }

    #[test]
    fn test_add_expense_rejects_bad_date_without_writing() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let mut expense = coffee();
        expense.date = "2024-13-05".into();
        let err = service.add_expense(expense).unwrap_err();
        assert!(matches!(err, LedgerError::MonthOutOfRange(13)));

        let mut expense = coffee();
        expense.date = "yesterday".into();
        let err = service.add_expense(expense).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDateFormat(_)));

        assert_eq!(store.expense_count().unwrap(), 0);
    }

    #[test]
    fn test_add_expense_rejects_negative_amount() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let mut expense = coffee();
        expense.amount = Money::from_cents(-100);
        assert!(matches!(
            service.add_expense(expense),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(store.expense_count().unwrap(), 0);
    }

    #[test]
    fn test_remove_expense_twice() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let id = service.add_expense(coffee()).unwrap();
        service.remove_expense(id).unwrap();
        service.remove_expense(id).unwrap();

        assert!(service.create_month_view(2024, 3).expenses().is_empty());
    }

    #[test]
    fn test_set_budget_for_month_formats_amount() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.set_budget_for_month("15.5", "2024-03").unwrap();
        assert_eq!(store.budget("2024-03").unwrap().as_deref(), Some("15.50"));

        service.set_budget_for_month("99.999", "2024/4").unwrap();
        assert_eq!(store.budget("2024-04").unwrap().as_deref(), Some("99.99"));
    }

    #[test]
    fn test_set_budget_validation_aborts_write() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        assert!(matches!(
            service.set_budget_for_month("lots", "2024-03"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.set_budget_for_month("10", "2024-00"),
            Err(LedgerError::MonthOutOfRange(0))
        ));
        assert!(matches!(
            service.set_default_budget("ten"),
            Err(LedgerError::InvalidAmount(_))
        ));

        assert_eq!(store.budget("2024-03").unwrap(), None);
        assert_eq!(store.budget("2024-00").unwrap(), None);
        assert_eq!(store.default_budget().unwrap().as_deref(), Some("0.00"));
    }

    #[test]
    fn test_set_budget_also_default() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.set_budget("700", "2024-05", true).unwrap();
        assert_eq!(store.budget("2024-05").unwrap().as_deref(), Some("700.00"));
        assert_eq!(store.default_budget().unwrap().as_deref(), Some("700.00"));

        service.set_budget("300", "2024-06", false).unwrap();
        assert_eq!(store.default_budget().unwrap().as_deref(), Some("700.00"));

        // bad date: neither row changes
        assert!(service.set_budget("1", "2024-99", true).is_err());
        assert_eq!(store.default_budget().unwrap().as_deref(), Some("700.00"));
    }

    #[test]
    fn test_month_view_uses_default_budget() {
        let store = SqliteStore::open_in_memory().unwrap();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.add_expense(coffee()).unwrap();
        service.add_expense(rent()).unwrap();
        service.set_default_budget("1500.00").unwrap();

        let view = service.build_month_data(2024, 3);
        assert_eq!(view.expenses().len(), 2);
        assert_eq!(view.total_spendings().to_string(), "1204.50");
        assert_eq!(view.budget().to_string(), "1500.00");
        assert_eq!(view.money_left().to_string(), "295.50");
    }

    #[test]
    fn test_month_budget_overrides_default() {
        let store = SqliteStore::open_in_memory().unwrap();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.add_expense(coffee()).unwrap();
        service.add_expense(rent()).unwrap();
        service.set_default_budget("1500.00").unwrap();
        service.set_budget_for_month("500.00", "2024-03").unwrap();

        let view = service.build_month_data(2024, 3);
        assert_eq!(view.budget().to_string(), "500.00");
        assert_eq!(view.money_left().to_string(), "-704.50");
        assert!(view.is_over_budget());

        // neighbouring month still falls back to the default
        let april = service.build_month_data(2024, 4);
        assert!(april.expenses().is_empty());
        assert_eq!(april.budget().to_string(), "1500.00");
        assert_eq!(april.money_left().to_string(), "1500.00");
    }

    #[test]
    fn test_empty_month_budget_falls_back() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        store.set_default_budget("250.00").unwrap();
        store.upsert_budget("", "2024-03").unwrap();

        assert_eq!(service.build_month_data(2024, 3).budget().to_string(), "250.00");
    }

    #[test]
    fn test_corrupt_budget_treated_as_zero() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.add_expense(coffee()).unwrap();
        store.upsert_budget("twelve", "2024-03").unwrap();

        let view = service.build_month_data(2024, 3);
        assert!(view.budget().is_zero());
        assert_eq!(view.money_left().to_string(), "-4.50");

        let errors: Vec<_> = logger
            .entries()
            .into_iter()
            .filter(|e| e.level == Level::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("twelve"));
    }

    #[test]
    fn test_unreadable_amount_keeps_month_visible() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.sqlite3");
        let logger = Logger::in_memory();

        {
            let store = SqliteStore::open(&path).unwrap();
            let service = LedgerService::new(&store, &logger);
            service.add_expense(coffee()).unwrap();
            service.add_expense(rent()).unwrap();
            store.close().unwrap();
        }
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.execute(
                "INSERT INTO expenses (name, category, date, amount) VALUES ('Legacy', 'Misc', '2024-03-09', '1.0e+20')",
                [],
            )
            .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let service = LedgerService::new(&store, &logger);
        service.set_default_budget("1500.00").unwrap();

        let view = service.build_month_data(2024, 3);
        assert_eq!(view.expenses().len(), 3);
        assert_eq!(view.expenses()[2].name, "Legacy");
        assert!(view.expenses()[2].amount.is_zero());
        assert_eq!(view.total_spendings().to_string(), "1204.50");
        assert_eq!(view.money_left().to_string(), "295.50");

        let warnings: Vec<_> = logger
            .entries()
            .into_iter()
            .filter(|e| e.level == Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("1.0e+20"));
    }

    #[test]
    fn test_huge_amounts_clamp_instead_of_panicking() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let max = Money::parse("92233720368547758.07").unwrap();
        service
            .add_expense(NewExpense::new("Yacht", "Toys", "2024-03-02", max))
            .unwrap();
        service
            .add_expense(NewExpense::new("Gum", "Food", "2024-03-03", Money::from_cents(1)))
            .unwrap();

        let view = service.build_month_data(2024, 3);
        assert_eq!(view.expenses().len(), 2);
        assert_eq!(view.total_spendings(), max);
        assert!(view.is_over_budget());

        let errors: Vec<_> = logger
            .entries()
            .into_iter()
            .filter(|e| e.level == Level::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("out of range"));
    }

    #[test]
    fn test_money_left_invariant() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let amounts = [1, 99, 1050, 33333, 7, 250000];
        for (i, cents) in amounts.iter().enumerate() {
            let date = format!("2024-0{}-1{}", 1 + i % 3, i);
            service
                .add_expense(NewExpense::new("x", "y", date, Money::from_cents(*cents)))
                .unwrap();
        }
        service.set_default_budget("1000.10").unwrap();
        service.set_budget_for_month("0.30", "2024-02").unwrap();

        for month in 1..=4 {
            let view = service.build_month_data(2024, month);
            let total: Money = view.expenses().iter().map(|e| e.amount).sum();
            assert_eq!(view.total_spendings(), total);
            assert_eq!(view.money_left(), view.budget() - view.total_spendings());
        }
    }

    #[test]
    fn test_view_reflects_current_store() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let first = service.build_month_data(2024, 3);
        let id = service.add_expense(coffee()).unwrap();
        let second = service.month_data(YearMonth::new(2024, 3).unwrap());
        service.remove_expense(id).unwrap();
        let third = service.build_month_data(2024, 3);

        assert_eq!(first.expenses().len(), 0);
        assert_eq!(second.expenses().len(), 1);
        assert_eq!(third, first);
    }

    #[test]
    fn test_read_failures_degrade() {
        let store = BrokenStore;
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        let view = service.build_month_data(2024, 3);
        assert!(view.expenses().is_empty());
        assert!(view.budget().is_zero());
        assert!(view.money_left().is_zero());

        // expenses, month budget, default budget, unparsable empty budget
        let errors = logger
            .entries()
            .iter()
            .filter(|e| e.level == Level::Error)
            .count();
        assert_eq!(errors, 4);
    }

    #[test]
    fn test_write_failures_propagate() {
        let store = BrokenStore;
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        assert!(matches!(
            service.add_expense(coffee()),
            Err(LedgerError::StorageWriteFailure(_))
        ));
        assert!(matches!(
            service.remove_expense(ExpenseId::new(1)),
            Err(LedgerError::StorageWriteFailure(_))
        ));
        assert!(matches!(
            service.set_budget_for_month("1", "2024-01"),
            Err(LedgerError::StorageWriteFailure(_))
        ));
        assert!(matches!(
            service.set_default_budget("1"),
            Err(LedgerError::StorageWriteFailure(_))
        ));
        assert_eq!(logger.entries().len(), 4);
    }

    #[test]
    fn test_successful_writes_are_logged() {
        let store = MemoryStore::new();
        let logger = Logger::in_memory();
        let service = LedgerService::new(&store, &logger);

        service.add_expense(coffee()).unwrap();
        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Info);
        assert_eq!(entries[0].details.as_ref().unwrap()["date"], "2024-03-05");
    }
}
