//! Defines the crate level error type and its conversions from the errors of
//! the underlying libraries.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An outcome transaction was larger than the current balance.
    ///
    /// Only the single transaction path checks the balance, imports are
    /// accepted as is.
    #[error("an outcome of {value} exceeds the current balance of {balance}")]
    InsufficientBalance {
        /// The balance total at the time of the check.
        balance: f64,
        /// The value of the rejected transaction.
        value: f64,
    },

    /// A transaction value was negative, NaN or infinite.
    #[error("{0} is not a valid transaction value, values must be zero or positive")]
    InvalidValue(f64),

    /// A transaction type other than "income" or "outcome" was given.
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"outcome\"")]
    InvalidTransactionType(String),

    /// An empty string was used to create a category title.
    #[error("category title cannot be empty")]
    EmptyCategoryTitle,

    /// The category ID used to create a transaction did not match a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// The import file could not be opened, read or removed.
    ///
    /// The string holds the message of the underlying IO error.
    #[error("could not access the import file: {0}")]
    ImportFile(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory,
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        if let csv::ErrorKind::Io(error) = value.kind() {
            return Error::ImportFile(error.to_string());
        }

        match value.position() {
            Some(position) => {
                Error::InvalidCSV(format!("line {}: {value}", position.line()))
            }
            None => Error::InvalidCSV(value.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::ImportFile(value.to_string())
    }
}
