//! The operations of the application, built on top of the [stores](crate::stores).
//!
//! Services receive their stores through their constructors or arguments, so
//! any implementation of the store traits can be used.

mod create_transaction;
mod import_transactions;
mod transactions;

pub use create_transaction::TransactionCreator;
pub use import_transactions::BulkImporter;
pub use transactions::{TransactionsWithBalance, delete_transaction, list_transactions};
