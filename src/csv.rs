//! Functions to parse transactions from CSV files.
//!
//! The expected format is a header line followed by lines with four fields:
//!
//! ```text
//! title, type, value, category
//! Loan, income, 1500, Others
//! Website Hosting, outcome, 50, Others
//! ```

use std::{fs::File, io::Read, path::Path, str::FromStr};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    Error,
    models::{CategoryTitle, TransactionType, validate_value},
};

const TITLE_COLUMN: usize = 0;
const TYPE_COLUMN: usize = 1;
const VALUE_COLUMN: usize = 2;
const CATEGORY_COLUMN: usize = 3;
const COLUMN_COUNT: usize = 4;

/// A transaction read from one line of a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    /// A text description of what the transaction was for.
    pub title: String,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// The amount of money earned or spent.
    pub value: f64,
    /// The title of the category the transaction belongs to.
    pub category_title: CategoryTitle,
}

/// Read and parse the CSV file at `path`.
///
/// # Errors
/// Returns an [Error::ImportFile] if the file cannot be opened, or any of the
/// errors of [parse_csv].
pub fn read_csv_file(path: &Path) -> Result<Vec<CsvRecord>, Error> {
    let file = File::open(path)?;

    parse_csv(file)
}

/// Parse transactions from CSV data.
///
/// The first line is treated as a header and skipped. Whitespace around each
/// field is removed and empty lines are ignored.
///
/// Returns the records in the order they appear in `data`, or an empty vector
/// if there are no lines after the header.
///
/// # Errors
/// Returns an [Error::InvalidCSV] naming the offending line if:
/// - a line does not have exactly four fields,
/// - the type is not "income" or "outcome",
/// - the value is not a number that is zero or positive,
/// - the category title is empty,
/// - or the data is not valid CSV.
pub fn parse_csv(data: impl Read) -> Result<Vec<CsvRecord>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let records = reader
        .records()
        .map(|maybe_record| -> Result<CsvRecord, Error> { parse_record(&maybe_record?) })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Parsed {} records from CSV data", records.len());

    Ok(records)
}

fn parse_record(record: &StringRecord) -> Result<CsvRecord, Error> {
    let line = record
        .position()
        .map(|position| position.line())
        .unwrap_or_default();

    if record.len() != COLUMN_COUNT {
        return Err(Error::InvalidCSV(format!(
            "line {line}: expected {COLUMN_COUNT} fields (title, type, value, category), got {}",
            record.len()
        )));
    }

    let title = &record[TITLE_COLUMN];

    let transaction_type = TransactionType::from_str(&record[TYPE_COLUMN])
        .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))?;

    let value = record[VALUE_COLUMN]
        .parse::<f64>()
        .map_err(|error| {
            Error::InvalidCSV(format!(
                "line {line}: could not parse '{}' as a value: {error}",
                &record[VALUE_COLUMN]
            ))
        })
        .and_then(|value| {
            validate_value(value)
                .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))
        })?;

    let category_title = CategoryTitle::new(&record[CATEGORY_COLUMN])
        .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))?;

    Ok(CsvRecord {
        title: title.to_owned(),
        transaction_type,
        value,
        category_title,
    })
}
