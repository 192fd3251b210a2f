//! GraphQL schema and HTTP handlers.
//!
//! # Operations
//!
//! - `users`, `userById`, `userByName`, `orders`, `order` (queries)
//! - `seedDatabase` (mutation)
//! - `User.orders` (nested field)
//!
//! The schema itself holds no data. Every request gets a fresh
//! [`RequestContext`](crate::context::RequestContext) attached by
//! [`graphql_handler`], and resolvers read it with
//! `ctx.data::<RequestContext>()`.

mod mutation;
mod query;
mod types;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::state::AppState;

/// Path the GraphQL endpoint is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Executable schema type.
pub type QuarrySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema.
#[must_use]
pub fn build_schema() -> QuarrySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(async_graphql::extensions::Tracing)
        .finish()
}

/// Schema definition language for the API.
#[must_use]
pub fn sdl() -> String {
    build_schema().sdl()
}

/// Execute a GraphQL request with a fresh request context.
pub async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(state.request_context());
    state.schema().execute(request).await.into()
}

/// GraphiQL explorer pointed at [`GRAPHQL_PATH`].
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
