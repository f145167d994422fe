pub mod expenses;
pub mod fees;
pub mod init;
pub mod payments;
pub mod properties;
pub mod reconcile;

use clap::{Parser, Subcommand};

/// Parse a `--accept` row-number list like "1,3,4" (1-based as printed).
/// Repeated rows are kept once so a row cannot be committed twice.
pub(crate) fn parse_row_list(raw: &str) -> Vec<usize> {
    let mut rows: Vec<usize> = Vec::new();
    for part in raw.split(',') {
        if let Ok(row) = part.trim().parse::<usize>() {
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
    }
    rows
}

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Bank-statement reconciliation CLI for self-managed strata schemes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up strata: choose a data directory and initialize the database.
    Init {
        /// Path for strata data (default: ~/Documents/strata)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Name of the strata scheme
        #[arg(long)]
        scheme: Option<String>,
    },
    /// Manage properties (units) in the scheme.
    Properties {
        #[command(subcommand)]
        command: PropertiesCommands,
    },
    /// Manage strata fees and billing periods.
    Fees {
        #[command(subcommand)]
        command: FeesCommands,
    },
    /// Manage strata-wide expenses.
    Expenses {
        #[command(subcommand)]
        command: ExpensesCommands,
    },
    /// List recorded payments.
    Payments,
    /// Match an uploaded bank statement against properties, fees and
    /// expenses, and optionally commit accepted rows.
    Reconcile {
        /// Path to the CSV bank statement
        file: String,
        /// Comma-separated row numbers to accept (as printed), e.g. 1,3
        #[arg(long)]
        accept: Option<String>,
        /// Allow accepting rows flagged as duplicates
        #[arg(long = "include-duplicates")]
        include_duplicates: bool,
    },
}

#[derive(Subcommand)]
pub enum PropertiesCommands {
    /// Add a property.
    Add {
        /// Unit label, e.g. 101
        unit: String,
        /// Owner display name
        #[arg(long)]
        owner: Option<String>,
        /// Owner email
        #[arg(long)]
        email: Option<String>,
        /// Entitlement share (default 1.0)
        #[arg(long, default_value_t = 1.0)]
        entitlement: f64,
    },
    /// List properties with balances.
    List,
}

#[derive(Subcommand)]
pub enum FeesCommands {
    /// Create a billing period and raise pro-rata fees for every property.
    Raise {
        /// Period name, e.g. "Q1 2024"
        period: String,
        /// Period start date (YYYY-MM-DD); also the fee issue date
        #[arg(long)]
        start: String,
        /// Period end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Total amount to distribute across properties by entitlement
        #[arg(long)]
        total: f64,
    },
    /// Mark a fee paid outside reconciliation.
    MarkPaid {
        /// Fee id as shown by `fees list`
        id: i64,
    },
    /// List fees with paid state.
    List,
}

#[derive(Subcommand)]
pub enum ExpensesCommands {
    /// Add a strata-wide expense.
    Add {
        /// What the expense is for
        description: String,
        /// Invoice amount
        #[arg(long)]
        amount: f64,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List expenses.
    List,
}
