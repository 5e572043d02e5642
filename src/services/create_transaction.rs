//! Creates single transactions, checking outcomes against the current balance.

use crate::{
    Error,
    models::{CategoryTitle, Transaction, TransactionType, validate_value},
    stores::{CategoryStore, TransactionStore},
};

/// Validates and saves one transaction at a time.
///
/// The category is looked up by title and created if it does not exist yet.
/// Outcomes larger than the current balance are rejected, see [TransactionCreator::create].
#[derive(Debug, Clone)]
pub struct TransactionCreator<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    transaction_store: T,
    category_store: C,
}

impl<T, C> TransactionCreator<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    /// Create a new transaction creator that writes to the given stores.
    pub fn new(transaction_store: T, category_store: C) -> Self {
        Self {
            transaction_store,
            category_store,
        }
    }

    /// Create and save a transaction in the category titled `category_title`.
    ///
    /// The category is resolved before the balance is checked, so a category
    /// created by a rejected outcome stays in the store.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidValue] if `value` is negative, NaN or infinite,
    /// - [Error::EmptyCategoryTitle] if `category_title` is empty,
    /// - [Error::InsufficientBalance] if `transaction_type` is
    ///   [TransactionType::Outcome] and `value` is larger than the balance total,
    /// - or any error from the stores.
    pub fn create(
        &mut self,
        title: &str,
        value: f64,
        transaction_type: TransactionType,
        category_title: &str,
    ) -> Result<Transaction, Error> {
        let value = validate_value(value)?;
        let category_title = CategoryTitle::new(category_title)?;

        let category = self.category_store.get_or_create(category_title)?;
        tracing::debug!(
            "Resolved category \"{}\" to ID {}",
            category.title,
            category.id
        );

        let transaction = self
            .transaction_store
            .create_if_covered(Transaction::build(
                title,
                value,
                transaction_type,
                category.id,
            ))
            .inspect_err(|error| {
                if let Error::InsufficientBalance { balance, value } = error {
                    tracing::warn!(
                        "Rejected outcome \"{title}\" of {value}, the balance is only {balance}"
                    );
                }
            })?;

        tracing::info!(
            "Created {} transaction {} \"{}\" for {}",
            transaction.transaction_type,
            transaction.id,
            transaction.title,
            transaction.value
        );

        Ok(transaction)
    }
}
