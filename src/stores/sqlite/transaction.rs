//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    database_id::TransactionID,
    db::{CreateTable, MapRow},
    models::{Balance, Transaction, TransactionBuilder, TransactionType},
    stores::TransactionStore,
};

const INSERT_TRANSACTION: &str =
    "INSERT INTO \"transaction\" (title, value, type, category_id)
     VALUES (?1, ?2, ?3, ?4)
     RETURNING id, title, value, type, category_id";

fn query_balance(connection: &Connection) -> Result<Balance, rusqlite::Error> {
    let (income, outcome) = connection.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN type = 'income' THEN value END), 0.0),
            COALESCE(SUM(CASE WHEN type = 'outcome' THEN value END), 0.0)
         FROM \"transaction\"",
        [],
        |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)),
    )?;

    Ok(Balance::new(income, outcome))
}

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [Category](crate::models::Category)
/// model, the category table must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(INSERT_TRANSACTION)?
            .query_row(
                (
                    builder.title,
                    builder.value,
                    builder.transaction_type,
                    builder.category_id,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Check the balance and insert the transaction inside one immediate
    /// database transaction.
    ///
    /// The write lock is taken before the balance is read, so other
    /// connections to the same database file are also kept out.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InsufficientBalance] if `builder` is an outcome larger than the balance,
    /// - [Error::InvalidCategory] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create_if_covered(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let tx = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        if builder.transaction_type == TransactionType::Outcome {
            let balance = query_balance(&tx)?;

            if !balance.covers(builder.value) {
                return Err(Error::InsufficientBalance {
                    balance: balance.total,
                    value: builder.value,
                });
            }
        }

        let transaction = tx.prepare(INSERT_TRANSACTION)?.query_row(
            (
                builder.title,
                builder.value,
                builder.transaction_type,
                builder.category_id,
            ),
            Self::map_row,
        )?;

        tx.commit()?;

        Ok(transaction)
    }

    /// Create many transactions inside one database transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if any of the category IDs do not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    ///
    /// No transactions are created if an error is returned.
    fn import(&mut self, builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let tx = connection.unchecked_transaction()?;
        let mut imported_transactions = Vec::with_capacity(builders.len());

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(INSERT_TRANSACTION)?;

        for builder in builders {
            let transaction = stmt.query_row(
                (
                    builder.title,
                    builder.value,
                    builder.transaction_type,
                    builder.category_id,
                ),
                Self::map_row,
            )?;

            imported_transactions.push(transaction);
        }

        drop(stmt);

        tx.commit()?;
        Ok(imported_transactions)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionID) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(
                "SELECT id, title, value, type, category_id FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve all transactions in the database, oldest first.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, title, value, type, category_id FROM \"transaction\" ORDER BY id")?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&mut self, id: TransactionID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Sum the income and outcome transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_balance(&self) -> Result<Balance, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        query_balance(&connection).map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    value REAL NOT NULL CHECK (value >= 0),
                    type TEXT NOT NULL CHECK (type IN ('income', 'outcome')),
                    category_id INTEGER NOT NULL,
                    FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            title: row.get(offset + 1)?,
            value: row.get(offset + 2)?,
            transaction_type: row.get(offset + 3)?,
            category_id: row.get(offset + 4)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::initialize,
        models::{Balance, Category, CategoryTitle, Transaction, TransactionType},
        stores::{CategoryStore, sqlite::SQLiteCategoryStore},
    };

    use super::{Error, SQLiteTransactionStore, TransactionStore};

    fn get_store_and_category() -> (SQLiteTransactionStore, Category) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let category = SQLiteCategoryStore::new(connection.clone())
            .get_or_create(CategoryTitle::new_unchecked("Food"))
            .unwrap();

        (SQLiteTransactionStore::new(connection), category)
    }

    #[test]
    fn create_succeeds() {
        let (mut store, category) = get_store_and_category();
        let builder = Transaction::build("coffee", 4.5, TransactionType::Outcome, category.id);

        let transaction = store.create(builder.clone()).unwrap();

        assert_eq!(transaction, builder.finalise(transaction.id));
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let (mut store, category) = get_store_and_category();

        let transaction = store.create(Transaction::build(
            "coffee",
            4.5,
            TransactionType::Outcome,
            category.id + 999,
        ));

        assert_eq!(transaction, Err(Error::InvalidCategory));
    }

    #[test]
    fn create_if_covered_saves_income_on_empty_balance() {
        let (mut store, category) = get_store_and_category();
        let builder = Transaction::build("salary", 100.0, TransactionType::Income, category.id);

        let transaction = store.create_if_covered(builder.clone()).unwrap();

        assert_eq!(transaction, builder.finalise(transaction.id));
        assert_eq!(store.get_balance().unwrap().total, 100.0);
    }

    #[test]
    fn create_if_covered_rejects_outcome_over_balance() {
        let (mut store, category) = get_store_and_category();
        store
            .create(Transaction::build("salary", 100.0, TransactionType::Income, category.id))
            .unwrap();

        let result = store.create_if_covered(Transaction::build(
            "rent",
            100.01,
            TransactionType::Outcome,
            category.id,
        ));

        assert_eq!(
            result,
            Err(Error::InsufficientBalance {
                balance: 100.0,
                value: 100.01
            })
        );
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn create_if_covered_accepts_outcome_equal_to_summed_cents() {
        let (mut store, category) = get_store_and_category();
        store
            .create(Transaction::build("refund", 0.3, TransactionType::Income, category.id))
            .unwrap();
        store
            .create(Transaction::build("stamp", 0.1, TransactionType::Outcome, category.id))
            .unwrap();

        let result = store.create_if_covered(Transaction::build(
            "envelope",
            0.2,
            TransactionType::Outcome,
            category.id,
        ));

        assert!(result.is_ok(), "got {result:?}");
        assert_eq!(store.get_balance().unwrap().total, 0.0);
    }

    #[test]
    fn create_if_covered_fails_on_invalid_category_id() {
        let (mut store, category) = get_store_and_category();

        let result = store.create_if_covered(Transaction::build(
            "salary",
            10.0,
            TransactionType::Income,
            category.id + 999,
        ));

        assert_eq!(result, Err(Error::InvalidCategory));
    }

    #[test]
    fn get_returns_created_transaction() {
        let (mut store, category) = get_store_and_category();
        let want = store
            .create(Transaction::build("salary", 100.0, TransactionType::Income, category.id))
            .unwrap();

        let got = store.get(want.id);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let (store, _) = get_store_and_category();

        assert_eq!(store.get(42), Err(Error::NotFound));
    }

    #[test]
    fn import_multiple() {
        let (mut store, category) = get_store_and_category();
        let want = vec![
            Transaction::build("coffee", 5.0, TransactionType::Outcome, category.id),
            Transaction::build("salary", 678.9, TransactionType::Income, category.id),
        ];

        let imported = store.import(want.clone()).expect("Could not import transactions");

        assert_eq!(
            want.len(),
            imported.len(),
            "want {} transactions, got {}",
            want.len(),
            imported.len()
        );

        want.into_iter()
            .zip(imported.iter())
            .for_each(|(want, got)| {
                let want = want.finalise(got.id);
                assert_eq!(&want, got, "want transaction {want:?}, got {got:?}");
            });
    }

    #[test]
    fn import_rolls_back_on_invalid_category() {
        let (mut store, category) = get_store_and_category();

        let result = store.import(vec![
            Transaction::build("coffee", 5.0, TransactionType::Outcome, category.id),
            Transaction::build("ghost", 3.0, TransactionType::Outcome, category.id + 999),
        ]);

        assert_eq!(result, Err(Error::InvalidCategory));
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn get_all_returns_transactions_in_creation_order() {
        let (mut store, category) = get_store_and_category();
        let first = store
            .create(Transaction::build("first", 1.0, TransactionType::Income, category.id))
            .unwrap();
        let second = store
            .create(Transaction::build("second", 2.0, TransactionType::Income, category.id))
            .unwrap();

        assert_eq!(store.get_all(), Ok(vec![first, second]));
    }

    #[test]
    fn delete_removes_transaction() {
        let (mut store, category) = get_store_and_category();
        let transaction = store
            .create(Transaction::build("coffee", 5.0, TransactionType::Outcome, category.id))
            .unwrap();

        store.delete(transaction.id).unwrap();

        assert_eq!(store.get(transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_invalid_id() {
        let (mut store, _) = get_store_and_category();

        assert_eq!(store.delete(1337), Err(Error::NotFound));
    }

    #[test]
    fn balance_of_empty_store_is_zero() {
        let (store, _) = get_store_and_category();

        assert_eq!(store.get_balance(), Ok(Balance::new(0.0, 0.0)));
    }

    #[test]
    fn balance_sums_income_and_outcome() {
        let (mut store, category) = get_store_and_category();
        let builders = vec![
            Transaction::build("salary", 100.0, TransactionType::Income, category.id),
            Transaction::build("side gig", 50.0, TransactionType::Income, category.id),
            Transaction::build("rent", 80.0, TransactionType::Outcome, category.id),
        ];
        let transactions = store.import(builders).unwrap();

        let balance = store.get_balance().unwrap();

        assert_eq!(balance, Balance::from_transactions(&transactions));
        assert_eq!(balance.income, 150.0);
        assert_eq!(balance.outcome, 80.0);
        assert_eq!(balance.total, 70.0);
    }
}
