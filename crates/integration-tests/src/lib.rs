//! Integration tests for Quarry.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory store only
//! cargo test -p quarry-integration-tests
//!
//! # Also exercise PostgreSQL (the database is migrated by the test)
//! QUARRY_TEST_DATABASE_URL=postgres://localhost/quarry_test \
//!     cargo test -p quarry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `graphql_queries` - Query resolvers and scalar rendering
//! - `graphql_seed` - The `seedDatabase` mutation
//! - `http_router` - Routes, health checks, and request IDs
//! - `postgres_store` - `PgCollection` against a real database

use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use axum::Router;
use chrono::{TimeZone, Utc};
use quarry_api::config::ApiConfig;
use quarry_api::context::DataSources;
use quarry_api::db::{Collections, DocumentCollection, MemoryCollection};
use quarry_api::models::{Order, User};
use quarry_api::routes;
use quarry_api::state::AppState;
use quarry_core::{OrderId, Timestamp, UserId};

/// Application state over in-memory collections the test can inspect.
pub struct TestContext {
    pub users: Arc<MemoryCollection<User>>,
    pub orders: Arc<MemoryCollection<Order>>,
    pub state: AppState,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Empty collections.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(MemoryCollection::<User>::new());
        let orders = Arc::new(MemoryCollection::<Order>::new());
        let business = Collections::new(users.clone(), orders.clone());
        let state =
            AppState::with_data_sources(ApiConfig::default(), None, DataSources { business });

        Self {
            users,
            orders,
            state,
        }
    }

    /// Collections pre-loaded with the given documents.
    ///
    /// # Panics
    ///
    /// Panics if the documents contain duplicate ids.
    pub async fn with_documents(users: &[User], orders: &[Order]) -> Self {
        let ctx = Self::new();
        ctx.users
            .insert_many(users)
            .await
            .unwrap_or_else(|e| panic!("insert users: {e}"));
        ctx.orders
            .insert_many(orders)
            .await
            .unwrap_or_else(|e| panic!("insert orders: {e}"));
        ctx
    }

    /// Store operations issued against both collections so far.
    #[must_use]
    pub fn store_operations(&self) -> usize {
        self.users.operation_count() + self.orders.operation_count()
    }

    /// Execute a query with no variables.
    pub async fn execute(&self, query: &str) -> Response {
        self.execute_request(Request::new(query)).await
    }

    /// Execute a query with JSON variables.
    pub async fn execute_with(&self, query: &str, variables: serde_json::Value) -> Response {
        self.execute_request(Request::new(query).variables(Variables::from_json(variables)))
            .await
    }

    async fn execute_request(&self, request: Request) -> Response {
        let request = request.data(self.state.request_context());
        self.state.schema().execute(request).await
    }

    /// The HTTP router over this context's state.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }
}

/// Response data as JSON.
///
/// # Panics
///
/// Panics if the data cannot be represented as JSON.
#[must_use]
pub fn data(response: Response) -> serde_json::Value {
    response
        .data
        .into_json()
        .unwrap_or_else(|e| panic!("response data is not JSON: {e}"))
}

/// The `extensions.code` of the first error, if any.
#[must_use]
pub fn first_error_code(response: &Response) -> Option<String> {
    response
        .errors
        .first()
        .and_then(|err| err.extensions.as_ref())
        .and_then(|ext| ext.get("code"))
        .and_then(|code| match code {
            async_graphql::Value::String(s) => Some(s.clone()),
            _ => None,
        })
}

/// A user with a fresh id.
#[must_use]
pub fn user(first_name: &str, last_name: &str, email: &str) -> User {
    User {
        id: UserId::generate(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
    }
}

/// An order for `owner` with a fresh id.
#[must_use]
pub fn order(owner: &User, total: f64, created_at: Timestamp) -> Order {
    Order {
        id: OrderId::generate(),
        user_id: owner.id.clone(),
        total,
        created_at,
    }
}

/// `2023-10-27T10:00:00Z`.
///
/// # Panics
///
/// Panics only if chrono rejects the constant date.
#[must_use]
pub fn fixed_timestamp() -> Timestamp {
    Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0)
        .single()
        .map(Timestamp::from_datetime)
        .unwrap_or_else(|| panic!("valid date"))
}
