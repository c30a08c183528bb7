//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger service.

pub mod budget;
pub mod expense;
pub mod month;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_add, handle_remove, AddArgs};
pub use month::{handle_month, parse_period};
