//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// The database ID of a [Category](crate::models::Category).
pub type CategoryID = DatabaseID;

/// The database ID of a [Transaction](crate::models::Transaction).
pub type TransactionID = DatabaseID;
