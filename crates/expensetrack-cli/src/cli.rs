use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const ADD_AFTER_HELP: &str = "\
Field rules:
  --title, --amount and --category are required and may not be blank.
  --amount is any number greater than zero; `,` is read as `.`.
  --date is `dd/MM/yyyy` (ISO `YYYY-MM-DD` also works). Defaults to today.
  Entries are expenses unless --income is passed.

Examples:
  expensetrack add --title Salary --amount 50000 --category Income --date 01/06/2025 --income
  expensetrack add --title Groceries --amount 1500 --category Food --date 03/06/2025
";

#[derive(Debug, Parser)]
#[command(
    name = "expensetrack",
    version,
    about = "track income and expenses with a running balance",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Directory holding the transaction database (overrides EXPENSETRACK_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record an income or expense transaction
    #[command(after_long_help = ADD_AFTER_HELP)]
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: String,
        /// Transaction date (dd/MM/yyyy); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Record the entry as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Delete a transaction by id
    Delete {
        /// Id shown by `expensetrack list`
        id: i64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the balance summary and every transaction, newest first
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show balance, total income, total spent and transaction count
    Summary {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
