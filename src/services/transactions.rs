//! Listing and deleting transactions.

use serde::Serialize;

use crate::{
    Error,
    database_id::TransactionID,
    models::{Balance, Transaction},
    stores::TransactionStore,
};

/// All stored transactions together with the balance they add up to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionsWithBalance {
    /// The stored transactions, oldest first.
    pub transactions: Vec<Transaction>,
    /// The balance of `transactions`.
    pub balance: Balance,
}

/// Get every stored transaction and the current balance.
///
/// # Errors
/// Returns any error from the store.
pub fn list_transactions(store: &impl TransactionStore) -> Result<TransactionsWithBalance, Error> {
    let transactions = store.get_all()?;
    let balance = store.get_balance()?;

    Ok(TransactionsWithBalance {
        transactions,
        balance,
    })
}

/// Delete the transaction with `id`.
///
/// Deleting a transaction never removes its category.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no transaction with `id`, or any
/// other error from the store.
pub fn delete_transaction(store: &mut impl TransactionStore, id: TransactionID) -> Result<(), Error> {
    store.delete(id)?;

    tracing::info!("Deleted transaction {id}");

    Ok(())
}
