mod cli;
mod confirm;
mod db;
mod error;
mod fingerprint;
mod fmt;
mod ingest;
mod matcher;
mod models;
mod reconciler;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ExpensesCommands, FeesCommands, PropertiesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, scheme } => cli::init::run(data_dir, scheme),
        Commands::Properties { command } => match command {
            PropertiesCommands::Add {
                unit,
                owner,
                email,
                entitlement,
            } => cli::properties::add(&unit, owner.as_deref(), email.as_deref(), entitlement),
            PropertiesCommands::List => cli::properties::list(),
        },
        Commands::Fees { command } => match command {
            FeesCommands::Raise {
                period,
                start,
                end,
                total,
            } => cli::fees::raise(&period, &start, &end, total),
            FeesCommands::MarkPaid { id } => cli::fees::mark_paid(id),
            FeesCommands::List => cli::fees::list(),
        },
        Commands::Expenses { command } => match command {
            ExpensesCommands::Add {
                description,
                amount,
                due,
            } => cli::expenses::add(&description, amount, due.as_deref()),
            ExpensesCommands::List => cli::expenses::list(),
        },
        Commands::Payments => cli::payments::list(),
        Commands::Reconcile {
            file,
            accept,
            include_duplicates,
        } => cli::reconcile::run(&file, accept.as_deref(), include_duplicates),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
