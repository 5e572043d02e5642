use std::{
    error::Error,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use serde::Serialize;

use finance_tracker::{
    TransactionID,
    logging::setup_logging,
    models::TransactionType,
    services::{delete_transaction, list_transactions},
    stores::{
        CategoryStore,
        sqlite::{SQLAppState, create_app_state},
    },
};

/// Record income and outcome transactions in a SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    ///
    /// The database is created if it does not exist.
    #[arg(long)]
    db_path: PathBuf,

    /// Also append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a single transaction.
    ///
    /// Outcomes larger than the current balance are rejected.
    Create {
        /// What the transaction was for.
        #[arg(long)]
        title: String,

        /// The amount of money, zero or positive.
        #[arg(long)]
        value: f64,

        /// Either "income" or "outcome".
        #[arg(long = "type")]
        transaction_type: TransactionType,

        /// The category title, the category is created if it does not exist.
        #[arg(long)]
        category: String,
    },

    /// Import transactions from a CSV file and delete the file afterwards.
    ///
    /// The file must have a header line followed by lines of
    /// `title, type, value, category`.
    Import {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// List all transactions and the current balance.
    List,

    /// Delete a transaction.
    Delete {
        /// The ID of the transaction to delete.
        id: TransactionID,
    },

    /// List all categories.
    Categories,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not open log file: {error}");
        return ExitCode::FAILURE;
    }

    match run(&args.db_path, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: &Path, command: Command) -> Result<(), Box<dyn Error>> {
    let connection = Connection::open(db_path)?;
    let state: SQLAppState = create_app_state(connection)?;

    match command {
        Command::Create {
            title,
            value,
            transaction_type,
            category,
        } => {
            let transaction =
                state
                    .transaction_creator()
                    .create(&title, value, transaction_type, &category)?;
            print_json(&transaction)
        }
        Command::Import { path } => {
            let transactions = state.bulk_importer().import_from_file(&path)?;
            print_json(&transactions)
        }
        Command::List => print_json(&list_transactions(&state.transaction_store)?),
        Command::Delete { id } => {
            let mut store = state.transaction_store.clone();
            delete_transaction(&mut store, id)?;
            Ok(())
        }
        Command::Categories => print_json(&state.category_store.get_all()?),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}
