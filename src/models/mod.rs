//! Core data models for the expense tracker
//!
//! Expenses, money amounts, date handling and the derived month view.

pub mod date;
pub mod expense;
pub mod money;
pub mod month;

pub use date::{normalize, DateParts, YearMonth};
pub use expense::{Expense, ExpenseId, NewExpense};
pub use money::Money;
pub use month::MonthData;
