//! Budget CLI commands

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::YearMonth;
use crate::services::LedgerService;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
        /// Month as YYYY-MM; defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Also use this amount as the default budget
        #[arg(long)]
        default: bool,
    },

    /// Set the default budget used by months without their own
    Default {
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(service: &LedgerService, cmd: BudgetCommands) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Set {
            amount,
            month,
            default,
        } => {
            let month = match month {
                Some(text) => YearMonth::parse(&text)?,
                None => YearMonth::current(),
            };

            service.set_budget(&amount, &month.key(), default)?;

            println!("Budget for {} set", month.friendly());
            if default {
                println!("Default budget updated");
            }
        }
        BudgetCommands::Default { amount } => {
            service.set_default_budget(&amount)?;
            println!("Default budget set");
        }
    }

    Ok(())
}
