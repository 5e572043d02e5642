//! This file defines the `Category` type and the types needed to create a category.
//! A category acts like a label for a transaction, a transaction always has exactly one category.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryID};

/// The title of a category.
///
/// Titles are the unique key of a category and are compared case-sensitively,
/// so "Food" and "food" are two different categories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryTitle(String);

impl CategoryTitle {
    /// Create a category title.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryTitle] if `title` is empty after trimming.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyCategoryTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create a category title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for CategoryTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryID,
    /// The unique title of the category.
    pub title: CategoryTitle,
}

#[cfg(test)]
mod category_title_tests {
    use crate::{Error, models::CategoryTitle};

    #[test]
    fn new_fails_on_empty_string() {
        let title = CategoryTitle::new("");

        assert_eq!(title, Err(Error::EmptyCategoryTitle));
    }

    #[test]
    fn new_fails_on_whitespace() {
        let title = CategoryTitle::new("  \t ");

        assert_eq!(title, Err(Error::EmptyCategoryTitle));
    }

    #[test]
    fn new_trims_whitespace() {
        let title = CategoryTitle::new("  Groceries ").unwrap();

        assert_eq!(title.as_ref(), "Groceries");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let title = CategoryTitle::new("🔥");

        assert!(title.is_ok())
    }

    #[test]
    fn titles_are_case_sensitive() {
        let lower = CategoryTitle::new("food").unwrap();
        let upper = CategoryTitle::new("Food").unwrap();

        assert_ne!(lower, upper);
    }
}
