//! Expense CLI commands

use clap::Args;

use crate::error::LedgerResult;
use crate::models::{ExpenseId, Money, NewExpense};
use crate::services::LedgerService;

/// Arguments for `expense add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    pub name: String,
    /// Amount (e.g., "4.50" or "12")
    pub amount: String,
    /// Category name
    #[arg(short, long, default_value = "Other")]
    pub category: String,
    /// Date as YYYY-MM-DD (also accepts '.' or '/'); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle `expense add`
pub fn handle_add(service: &LedgerService, args: AddArgs) -> LedgerResult<()> {
    let amount = Money::parse(&args.amount)?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());

    let expense = NewExpense::new(args.name, args.category, date, amount);
    let id = service.add_expense(expense)?;

    println!("Added expense #{}", id);
    Ok(())
}

/// Handle `expense remove`
pub fn handle_remove(service: &LedgerService, id: ExpenseId) -> LedgerResult<()> {
    service.remove_expense(id)?;
    println!("Removed expense #{}", id);
    Ok(())
}
