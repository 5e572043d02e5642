//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionID,
    models::{Balance, Transaction, TransactionBuilder},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Create a new transaction if the balance can pay for it.
    ///
    /// Outcomes are checked against the balance and saved as one atomic step,
    /// so two callers cannot both spend the same money. Income is always saved.
    ///
    /// Implementations should return [Error::InsufficientBalance] if the
    /// transaction is an outcome larger than the balance total.
    fn create_if_covered(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Create many transactions at once, e.g. from a CSV file.
    ///
    /// Either all of the transactions are created or none of them are. The
    /// returned transactions are in the same order as `builders`.
    fn import(&mut self, builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: TransactionID) -> Result<Transaction, Error>;

    /// Retrieve all transactions in the order they were created.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Remove a transaction from the store.
    ///
    /// Implementations should return [Error::NotFound] if `id` does not refer
    /// to a stored transaction.
    fn delete(&mut self, id: TransactionID) -> Result<(), Error>;

    /// Sum up the income and outcome of all stored transactions.
    fn get_balance(&self) -> Result<Balance, Error>;
}
