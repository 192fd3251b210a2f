//! User repository.
//!
//! Typed access to the `users` collection.

use std::sync::Arc;

use tracing::instrument;

use super::{DocumentCollection, Filter, RepositoryError};
use crate::models::User;

/// Repository for user documents.
#[derive(Clone)]
pub struct UserRepository {
    collection: Arc<dyn DocumentCollection<User>>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub fn new(collection: Arc<dyn DocumentCollection<User>>) -> Self {
        Self { collection }
    }

    /// Get every user in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<User>, RepositoryError> {
        self.collection.find_all().await
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        self.collection.find_by_id(id).await
    }

    /// Get the first user whose last name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn get_by_last_name(&self, last_name: &str) -> Result<Option<User>, RepositoryError> {
        self.collection
            .find_one(&Filter::equals("lastName", last_name))
            .await
    }

    /// Insert users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an id already exists.
    /// Returns `RepositoryError::Database` for other store errors.
    #[instrument(skip_all, fields(count = users.len()))]
    pub async fn insert_many(&self, users: &[User]) -> Result<u64, RepositoryError> {
        self.collection.insert_many(users).await
    }

    /// Delete every user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store operation fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        self.collection.delete_all().await
    }
}
