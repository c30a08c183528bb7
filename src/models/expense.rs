//! Expense model
//!
//! Expenses are write-once: the store assigns an id on insert and the only
//! other mutation is deletion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Store-assigned expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// An expense that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub category: String,
    /// Date as typed; canonical once it has passed through the service
    pub date: String,
    pub amount: Money,
}

impl NewExpense {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            date: date.into(),
            amount,
        }
    }

    /// Attach the id assigned by the store
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            name: self.name,
            category: self.category,
            date: self.date,
            amount: self.amount,
        }
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub category: String,
    /// Canonical `YYYY-MM` or `YYYY-MM-DD`
    pub date: String,
    pub amount: Money,
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} [{}] {}",
            self.id, self.date, self.name, self.category, self.amount
        )
    }
}
