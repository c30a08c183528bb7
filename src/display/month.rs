//! Month view formatting
//!
//! Renders a [`MonthData`] as a header, an expense table and a short
//! budget summary.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, MonthData};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, symbol: &str) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.clone(),
            name: expense.name.clone(),
            category: expense.category.clone(),
            amount: expense.amount.format_with_symbol(symbol),
        }
    }
}

/// Format the expense table alone
pub fn format_expense_table(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow::new(e, symbol));
    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string()
}

/// Format a full month view: header, expenses, then Budget / Total / Left
pub fn format_month_view(data: &MonthData, symbol: &str) -> String {
    let title = match data.year_month() {
        Some(ym) => ym.friendly(),
        None => format!("{}-{:02}", data.year(), data.month()),
    };

    let mut output = String::new();
    output.push_str(&format!("Expenses: {}\n", title));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format_expense_table(data.expenses(), symbol));
    output.push_str("\n\n");

    let amounts = [
        data.budget().format_with_symbol(symbol),
        data.total_spendings().format_with_symbol(symbol),
        data.money_left().format_with_symbol(symbol),
    ];
    let width = amounts.iter().map(|a| a.len()).max().unwrap_or(0);

    output.push_str(&format!("Budget: {:>width$}\n", amounts[0], width = width));
    output.push_str(&format!("Total:  {:>width$}\n", amounts[1], width = width));
    output.push_str(&format!("Left:   {:>width$}", amounts[2], width = width));
    if data.is_over_budget() {
        output.push_str("  (over budget)");
    }
    output.push('\n');

    output
}
