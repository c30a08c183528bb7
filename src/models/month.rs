//! Month view aggregate
//!
//! `MonthData` is computed from the store on every request and never
//! persisted. Construction goes through [`MonthData::new`] so the money-left
//! figure always equals budget minus total.

use serde::Serialize;

use super::date::YearMonth;
use super::expense::Expense;
use super::money::Money;

/// Expenses, budget and balance for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthData {
    year: i32,
    month: u32,
    expenses: Vec<Expense>,
    budget: Money,
    total_spendings: Money,
    money_left: Money,
}

impl MonthData {
    pub fn new(year: i32, month: u32, expenses: Vec<Expense>, budget: Money) -> Self {
        let total_spendings: Money = expenses.iter().map(|e| &e.amount).sum();
        Self {
            year,
            month,
            expenses,
            budget,
            total_spendings,
            money_left: budget - total_spendings,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The year-month this view covers, if the month is valid
    pub fn year_month(&self) -> Option<YearMonth> {
        YearMonth::new(self.year, self.month).ok()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn total_spendings(&self) -> Money {
        self.total_spendings
    }

    pub fn money_left(&self) -> Money {
        self.money_left
    }

    pub fn is_over_budget(&self) -> bool {
        self.money_left.is_negative()
    }
}
