//! This module defines the domain data types.

pub use balance::Balance;
pub use category::{Category, CategoryTitle};
pub use transaction::{Transaction, TransactionBuilder, TransactionType, validate_value};

mod balance;
mod category;
mod transaction;
