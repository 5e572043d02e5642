//! Finance tracker is a library for recording income and outcome transactions.
//!
//! Transactions can be created one at a time with a [TransactionCreator],
//! which rejects outcomes that the current balance cannot cover, or in bulk
//! from a CSV file with a [BulkImporter]. Both create the categories the
//! transactions refer to as needed, so each category title is stored once.
//!
//! Storage goes through the [stores::TransactionStore] and
//! [stores::CategoryStore] traits. The [stores::sqlite] module implements
//! them on top of SQLite.
//!
//! [TransactionCreator]: services::TransactionCreator
//! [BulkImporter]: services::BulkImporter

#![warn(missing_docs)]

mod app_state;
mod database_id;
mod error;

pub mod csv;
pub mod db;
pub mod logging;
pub mod models;
pub mod services;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::{CategoryID, DatabaseID, TransactionID};
pub use db::initialize as initialize_db;
pub use error::Error;
