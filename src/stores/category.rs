//! Defines the category store trait.

use std::collections::HashSet;

use crate::{
    Error,
    database_id::CategoryID,
    models::{Category, CategoryTitle},
};

/// Creates and retrieves transaction categories.
///
/// Category titles are unique within a store.
pub trait CategoryStore {
    /// Get the category with `title`, creating it if it does not exist yet.
    ///
    /// Implementations should do the lookup and the insert as one atomic
    /// operation so that concurrent callers cannot create the same title twice.
    fn get_or_create(&self, title: CategoryTitle) -> Result<Category, Error>;

    /// Create many categories at once.
    ///
    /// Either all of the categories are created or none of them are. The
    /// returned categories are in the same order as `titles`.
    fn create_many(&self, titles: Vec<CategoryTitle>) -> Result<Vec<Category>, Error>;

    /// Get the categories whose title is in `titles`.
    ///
    /// Titles without a matching category are skipped, the order of the
    /// returned categories is unspecified.
    fn get_by_titles(&self, titles: &HashSet<CategoryTitle>) -> Result<Vec<Category>, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: CategoryID) -> Result<Category, Error>;

    /// Get all categories.
    fn get_all(&self) -> Result<Vec<Category>, Error>;
}
