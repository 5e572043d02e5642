//! Defines the model for the balance derived from the stored transactions.

use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionType};

/// The amount of money available, derived from all stored transactions.
///
/// The balance is never stored, it is computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Balance {
    /// The sum of the values of all income transactions.
    pub income: f64,
    /// The sum of the values of all outcome transactions.
    pub outcome: f64,
    /// The income minus the outcome.
    pub total: f64,
}

/// Convert an amount of money to whole cents.
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn round_to_cents(amount: f64) -> f64 {
    to_cents(amount) as f64 / 100.0
}

impl Balance {
    /// Create a balance from the income and outcome sums.
    ///
    /// All three figures are rounded to the nearest cent so that summing
    /// many values does not leave float noise in the total.
    pub fn new(income: f64, outcome: f64) -> Self {
        Self {
            income: round_to_cents(income),
            outcome: round_to_cents(outcome),
            total: round_to_cents(income - outcome),
        }
    }

    /// Sum up the balance of `transactions`.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (income, outcome) = transactions.into_iter().fold(
            (0.0, 0.0),
            |(income, outcome), transaction| match transaction.transaction_type {
                TransactionType::Income => (income + transaction.value, outcome),
                TransactionType::Outcome => (income, outcome + transaction.value),
            },
        );

        Self::new(income, outcome)
    }

    /// Whether an outcome of `value` can be paid from this balance.
    ///
    /// Both amounts are compared in whole cents.
    pub fn covers(&self, value: f64) -> bool {
        to_cents(self.total) >= to_cents(value)
    }
}
