//! Display formatting for terminal output

pub mod log;
pub mod month;

pub use log::format_log_entries;
pub use month::{format_expense_table, format_month_view};
