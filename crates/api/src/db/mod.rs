//! Document store access.
//!
//! # Collections
//!
//! - `users` - [`User`] documents
//! - `orders` - [`Order`] documents
//!
//! Each collection is reached through the [`DocumentCollection`] trait, which
//! has two implementations:
//!
//! - [`PgCollection`] - JSONB rows in the `documents` table (`PostgreSQL`)
//! - [`MemoryCollection`] - an in-process vector, for development and tests
//!
//! No operation spans a transaction with another and nothing is retried;
//! failures surface to the caller immediately.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p quarry-cli -- migrate
//! ```

pub mod memory;
pub mod orders;
pub mod postgres;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::{Order, User};

pub use memory::MemoryCollection;
pub use orders::OrderRepository;
pub use postgres::PgCollection;
pub use users::UserRepository;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate document id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// A record that lives in a named collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name.
    const COLLECTION: &'static str;

    /// Unique identifier within the collection.
    fn id(&self) -> &str;
}

/// Field-equality predicate over a serialized document.
///
/// Field names are the serialized (camelCase) names, e.g. `lastName` or
/// `userId`. Non-string fields compare by their JSON text, matching
/// `PostgreSQL`'s `->>` operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: String,
    value: String,
}

impl Filter {
    /// Match documents whose `field` equals `value`.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The field being compared.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The value compared against.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether a serialized document satisfies the predicate.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        match doc.get(&self.field) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

/// Typed operations on one collection.
#[async_trait]
pub trait DocumentCollection<T: Document>: Send + Sync {
    /// Insert documents, returning the number the store reports inserted.
    async fn insert_many(&self, docs: &[T]) -> Result<u64, RepositoryError>;

    /// All documents in store order.
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// The document with the given id, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError>;

    /// The first document (in store order) matching the filter.
    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, RepositoryError>;

    /// Every document matching the filter, in store order.
    async fn find(&self, filter: &Filter) -> Result<Vec<T>, RepositoryError>;

    /// Remove every document, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

/// The Users and Orders collections.
#[derive(Clone)]
pub struct Collections {
    /// Users collection.
    pub users: UserRepository,
    /// Orders collection.
    pub orders: OrderRepository,
}

impl Collections {
    /// Build from explicit collection handles.
    #[must_use]
    pub fn new(
        users: Arc<dyn DocumentCollection<User>>,
        orders: Arc<dyn DocumentCollection<Order>>,
    ) -> Self {
        Self {
            users: UserRepository::new(users),
            orders: OrderRepository::new(orders),
        }
    }

    /// Collections backed by the `documents` table.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self::new(
            Arc::new(PgCollection::<User>::new(pool.clone())),
            Arc::new(PgCollection::<Order>::new(pool.clone())),
        )
    }

    /// Empty in-memory collections.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryCollection::<User>::new()),
            Arc::new(MemoryCollection::<Order>::new()),
        )
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Deserialize a stored document, reporting failures as corruption.
pub(crate) fn decode_document<T: Document>(doc: Value) -> Result<T, RepositoryError> {
    serde_json::from_value(doc).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid {} document: {e}", T::COLLECTION))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_filter_matches_string_field() {
        let filter = Filter::equals("lastName", "5");
        assert!(filter.matches(&json!({"lastName": "5"})));
        assert!(!filter.matches(&json!({"lastName": "50"})));
        assert!(!filter.matches(&json!({"firstName": "5"})));
    }

    #[test]
    fn test_filter_compares_non_strings_as_json_text() {
        assert!(Filter::equals("total", "12.5").matches(&json!({"total": 12.5})));
        assert!(Filter::equals("active", "true").matches(&json!({"active": true})));
        assert!(!Filter::equals("note", "null").matches(&json!({"note": null})));
    }

    #[test]
    fn test_decode_document_reports_corruption() {
        let result = decode_document::<User>(json!({"_id": "u1"}));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
