#![allow(missing_docs)]

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionID,
    models::{Balance, Transaction, TransactionBuilder},
    stores::{
        TransactionStore,
        sqlite::{SQLAppState, create_app_state},
    },
};

pub(crate) fn get_test_app_state() -> SQLAppState {
    let connection = Connection::open_in_memory().unwrap();

    create_app_state(connection).unwrap()
}

/// A transaction store that fails every batch import and forwards everything
/// else to `inner`.
#[derive(Debug, Clone)]
pub(crate) struct FailingImportStore<T> {
    inner: T,
}

impl<T: TransactionStore> FailingImportStore<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: TransactionStore> TransactionStore for FailingImportStore<T> {
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        self.inner.create(builder)
    }

    fn create_if_covered(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        self.inner.create_if_covered(builder)
    }

    fn import(&mut self, _builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, id: TransactionID) -> Result<Transaction, Error> {
        self.inner.get(id)
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.inner.get_all()
    }

    fn delete(&mut self, id: TransactionID) -> Result<(), Error> {
        self.inner.delete(id)
    }

    fn get_balance(&self) -> Result<Balance, Error> {
        self.inner.get_balance()
    }
}
