//! Date normalization
//!
//! Users type dates loosely ("2024-3-5", "2024.03.05", "2024/3"). Everything
//! stored goes through [`normalize`] first, which produces the canonical
//! `YYYY-MM` or `YYYY-MM-DD` form. Day ranges are checked against 1..=31 only;
//! there is no per-month day count.

use chrono::{Datelike, Local, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// Separators tried in order until one actually splits the input
const SEPARATORS: [char; 3] = ['-', '.', '/'];

/// Numeric parts of a parsed date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i64,
    pub month: i64,
    pub day: Option<i64>,
}

impl DateParts {
    /// Parse and range-check a loosely formatted date
    pub fn parse(input: &str) -> LedgerResult<Self> {
        let tokens = split_date(input.trim());

        if tokens.len() != 2 && tokens.len() != 3 {
            return Err(LedgerError::InvalidDateFormat(input.to_string()));
        }

        let numbers = tokens
            .iter()
            .map(|token| token.parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LedgerError::InvalidDateFormat(input.to_string()))?;

        let parts = Self {
            year: numbers[0],
            month: numbers[1],
            day: numbers.get(2).copied(),
        };

        if !(1..=12).contains(&parts.month) {
            return Err(LedgerError::MonthOutOfRange(parts.month));
        }

        if let Some(day) = parts.day {
            if !(1..=31).contains(&day) {
                return Err(LedgerError::DayOutOfRange(day));
            }
        }

        Ok(parts)
    }

    /// Render in canonical form
    pub fn canonical(&self) -> String {
        match self.day {
            Some(day) => format!("{}-{:02}-{:02}", self.year, self.month, day),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

/// Split on the first separator that yields more than one token
fn split_date(input: &str) -> Vec<&str> {
    for separator in SEPARATORS {
        let tokens: Vec<&str> = input.split(separator).collect();
        if tokens.len() > 1 {
            return tokens;
        }
    }
    vec![input]
}

/// Normalize a date string to `YYYY-MM` or `YYYY-MM-DD`
///
/// # Examples
/// ```
/// use expense_tracker::models::normalize;
/// assert_eq!(normalize("2024/3/5").unwrap(), "2024-03-05");
/// assert_eq!(normalize("2024.11").unwrap(), "2024-11");
/// assert!(normalize("2024-13-01").is_err());
/// ```
pub fn normalize(input: &str) -> LedgerResult<String> {
    DateParts::parse(input).map(|parts| parts.canonical())
}

/// A calendar month, used as the key for budgets and month views
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month, checking the month range
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::MonthOutOfRange(i64::from(month)));
        }
        Ok(Self { year, month })
    }

    /// Parse user input that names a month ("2024-03", "2024/3")
    ///
    /// Inputs carrying a day are rejected.
    pub fn parse(input: &str) -> LedgerResult<Self> {
        let parts = DateParts::parse(input)?;
        if parts.day.is_some() {
            return Err(LedgerError::InvalidDateFormat(format!(
                "expected a year and month without a day: {}",
                input
            )));
        }

        let year = i32::try_from(parts.year)
            .map_err(|_| LedgerError::InvalidDateFormat(input.to_string()))?;
        // month was range-checked above
        Self::new(year, parts.month as u32)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The `YYYY-MM` key used by storage
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-friendly label, e.g. "March 2024"
    pub fn friendly(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
