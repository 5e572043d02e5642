//! Implements a SQLite backed category store.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter};

use crate::{
    Error,
    database_id::CategoryID,
    db::{CreateTable, MapRow},
    models::{Category, CategoryTitle},
    stores::CategoryStore,
};

/// Inserts a category, or touches the existing row with the same title, and
/// returns the stored row either way.
const UPSERT_CATEGORY: &str = "INSERT INTO category (title) VALUES (?1)
     ON CONFLICT(title) DO UPDATE SET title = excluded.title
     RETURNING id, title;";

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Get or create a category with a single upsert statement.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_or_create(&self, title: CategoryTitle) -> Result<Category, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let category =
            connection.query_row(UPSERT_CATEGORY, (title.as_ref(),), SQLiteCategoryStore::map_row)?;

        Ok(category)
    }

    /// Create the categories inside one database transaction.
    ///
    /// A title that is already in the database resolves to the existing
    /// category instead of failing the batch.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error, in which
    /// case none of the categories are created.
    fn create_many(&self, titles: Vec<CategoryTitle>) -> Result<Vec<Category>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let tx = connection.unchecked_transaction()?;
        let mut categories = Vec::with_capacity(titles.len());

        {
            let mut stmt = tx.prepare(UPSERT_CATEGORY)?;

            for title in titles {
                let category = stmt.query_row((title.as_ref(),), SQLiteCategoryStore::map_row)?;
                categories.push(category);
            }
        }

        tx.commit()?;

        Ok(categories)
    }

    /// Retrieve the categories with the given titles.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_by_titles(&self, titles: &HashSet<CategoryTitle>) -> Result<Vec<Category>, Error> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=titles.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT id, title FROM category WHERE title IN ({placeholders});");
        let params = params_from_iter(titles.iter().map(|title| -> &str { title.as_ref() }));

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query)?
            .query_map(params, SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Retrieve the category with `category_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, category_id: CategoryID) -> Result<Category, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, title FROM category WHERE id = :id;")?
            .query_row(&[(":id", &category_id)], SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all categories in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, title FROM category ORDER BY id;")?
            .query_map([], SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL UNIQUE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_title: String = row.get(offset + 1)?;
        let title = CategoryTitle::new_unchecked(&raw_title);

        Ok(Self::ReturnType { id, title })
    }
}
