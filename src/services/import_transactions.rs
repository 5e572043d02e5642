//! Imports transactions in bulk from CSV files.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use crate::{
    Error,
    csv::{CsvRecord, read_csv_file},
    models::{Category, CategoryTitle, Transaction, TransactionBuilder},
    stores::{CategoryStore, TransactionStore},
};

/// Saves all of the transactions in a CSV file at once.
///
/// Unlike [TransactionCreator](crate::services::TransactionCreator), imported
/// outcomes are not checked against the balance.
#[derive(Debug, Clone)]
pub struct BulkImporter<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    transaction_store: T,
    category_store: C,
}

impl<T, C> BulkImporter<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    /// Create a new importer that writes to the given stores.
    pub fn new(transaction_store: T, category_store: C) -> Self {
        Self {
            transaction_store,
            category_store,
        }
    }

    /// Import the transactions in the CSV file at `path` and then delete the file.
    ///
    /// See [parse_csv](crate::csv::parse_csv) for the file format. The file is
    /// only deleted once all of the transactions have been saved.
    ///
    /// Returns the created transactions in the order they appear in the file.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ImportFile] if the file cannot be read or deleted,
    /// - [Error::InvalidCSV] if the file cannot be parsed,
    /// - or any error from the stores.
    pub fn import_from_file(&mut self, path: &Path) -> Result<Vec<Transaction>, Error> {
        let records = read_csv_file(path)?;
        let transactions = self.import_records(records)?;

        fs::remove_file(path)?;

        tracing::info!(
            "Imported {} transactions from {}",
            transactions.len(),
            path.display()
        );

        Ok(transactions)
    }

    /// Save the transactions in `records`, creating any missing categories.
    ///
    /// The categories are looked up with one query and the missing ones are
    /// created in one batch, in the order their titles first appear.
    ///
    /// # Errors
    /// Returns any error from the stores.
    pub fn import_records(&mut self, records: Vec<CsvRecord>) -> Result<Vec<Transaction>, Error> {
        let titles: HashSet<CategoryTitle> = records
            .iter()
            .map(|record| record.category_title.clone())
            .collect();

        let mut categories_by_title: HashMap<CategoryTitle, Category> = self
            .category_store
            .get_by_titles(&titles)?
            .into_iter()
            .map(|category| (category.title.clone(), category))
            .collect();

        let missing_titles: Vec<CategoryTitle> = {
            let mut seen = HashSet::new();

            records
                .iter()
                .map(|record| &record.category_title)
                .filter(|title| !categories_by_title.contains_key(*title))
                .filter(|title| seen.insert(*title))
                .cloned()
                .collect()
        };

        tracing::debug!(
            "Found {} existing categories, creating {} new categories",
            categories_by_title.len(),
            missing_titles.len()
        );

        if !missing_titles.is_empty() {
            for category in self.category_store.create_many(missing_titles)? {
                categories_by_title
                    .entry(category.title.clone())
                    .or_insert(category);
            }
        }

        let builders = records
            .into_iter()
            .map(|record| -> Result<TransactionBuilder, Error> {
                let category = categories_by_title
                    .get(&record.category_title)
                    .ok_or(Error::InvalidCategory)?;

                Ok(Transaction::build(
                    &record.title,
                    record.value,
                    record.transaction_type,
                    category.id,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.transaction_store.import(builders)
    }
}
