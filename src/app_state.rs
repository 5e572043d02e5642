//! Implements a struct that holds the stores shared by the services.

use crate::{
    services::{BulkImporter, TransactionCreator},
    stores::{CategoryStore, TransactionStore},
};

/// The stores backing the application.
///
/// The state is cheap to clone when the stores are, e.g. the SQLite stores
/// share one connection.
#[derive(Debug, Clone)]
pub struct AppState<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    /// The store for transactions and the balance derived from them.
    pub transaction_store: T,

    /// The store for transaction categories.
    pub category_store: C,
}

impl<T, C> AppState<T, C>
where
    T: TransactionStore + Clone,
    C: CategoryStore + Clone,
{
    /// Create a new [AppState] from the stores.
    pub fn new(transaction_store: T, category_store: C) -> Self {
        Self {
            transaction_store,
            category_store,
        }
    }

    /// A [TransactionCreator] that writes to this state's stores.
    pub fn transaction_creator(&self) -> TransactionCreator<T, C> {
        TransactionCreator::new(self.transaction_store.clone(), self.category_store.clone())
    }

    /// A [BulkImporter] that writes to this state's stores.
    pub fn bulk_importer(&self) -> BulkImporter<T, C> {
        BulkImporter::new(self.transaction_store.clone(), self.category_store.clone())
    }
}
