//! Expense tracker core
//!
//! Records expenses in SQLite and answers one question per month: what was
//! spent, what was the budget, and how much is left.
//!
//! # Architecture
//!
//! - `models`: money, dates, expenses and the computed month view
//! - `storage`: the [`storage::LedgerStore`] trait with SQLite and in-memory backends
//! - `services`: [`services::LedgerService`], validation and month aggregation
//! - `logging`: injected JSON-lines logger
//! - `config`: base directory and user settings
//! - `display` / `cli`: terminal front end for the `expense` binary
//!
//! # Example
//!
//! ```
//! use expense_tracker::logging::Logger;
//! use expense_tracker::models::{Money, NewExpense};
//! use expense_tracker::services::LedgerService;
//! use expense_tracker::storage::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let logger = Logger::disabled();
//! let ledger = LedgerService::new(&store, &logger);
//!
//! ledger
//!     .add_expense(NewExpense::new("Coffee", "Food", "2024.3.5", Money::from_cents(450)))
//!     .unwrap();
//! ledger.set_default_budget("100").unwrap();
//!
//! let march = ledger.create_month_view(2024, 3);
//! assert_eq!(march.money_left().to_string(), "95.50");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
