//! Order repository.
//!
//! Typed access to the `orders` collection.

use std::sync::Arc;

use tracing::instrument;

use quarry_core::UserId;

use super::{DocumentCollection, Filter, RepositoryError};
use crate::models::Order;

/// Repository for order documents.
#[derive(Clone)]
pub struct OrderRepository {
    collection: Arc<dyn DocumentCollection<Order>>,
}

impl OrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub fn new(collection: Arc<dyn DocumentCollection<Order>>) -> Self {
        Self { collection }
    }

    /// Get every order in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.collection.find_all().await
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Order>, RepositoryError> {
        self.collection.find_by_id(id).await
    }

    /// Get every order placed by a user. Empty if there are none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        self.collection
            .find(&Filter::equals("userId", user_id.as_str()))
            .await
    }

    /// Insert orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an id already exists.
    /// Returns `RepositoryError::Database` for other store errors.
    #[instrument(skip_all, fields(count = orders.len()))]
    pub async fn insert_many(&self, orders: &[Order]) -> Result<u64, RepositoryError> {
        self.collection.insert_many(orders).await
    }

    /// Delete every order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store operation fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        self.collection.delete_all().await
    }
}
