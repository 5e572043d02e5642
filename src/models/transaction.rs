//! This file defines the type `Transaction`, the core type of the application, and
//! the types needed to create one.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{CategoryID, TransactionID},
};

/// Whether money entered or left the tracked balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money entering the balance, e.g. wages.
    Income,
    /// Money leaving the balance, e.g. rent.
    Outcome,
}

impl TransactionType {
    /// The text used for the type in CSV files and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "outcome" => Ok(TransactionType::Outcome),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<TransactionType>()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Check that `value` can be used as the value of a transaction.
///
/// Values are amounts of money and the direction is given by the
/// [TransactionType], so they must be finite and not negative.
///
/// # Errors
/// Returns an [Error::InvalidValue] if `value` is negative, NaN or infinite.
pub fn validate_value(value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidValue(value))
    }
}

/// An income or outcome, i.e. an event where money was either earned or spent.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The amount of money earned or spent, always zero or positive.
    pub value: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryID,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        value: f64,
        transaction_type: TransactionType,
        category_id: CategoryID,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            value,
            transaction_type,
            category_id,
        }
    }
}

/// A transaction that has not been saved to a store yet.
///
/// Pass the builder to [TransactionStore::create](crate::stores::TransactionStore::create)
/// or [TransactionStore::import](crate::stores::TransactionStore::import) to save it.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// A text description of what the transaction was for.
    pub title: String,
    /// The amount of money earned or spent.
    pub value: f64,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: CategoryID,
}

impl TransactionBuilder {
    /// Build the transaction with the ID assigned by the store.
    pub fn finalise(self, id: TransactionID) -> Transaction {
        Transaction {
            id,
            title: self.title,
            value: self.value,
            transaction_type: self.transaction_type,
            category_id: self.category_id,
        }
    }
}
