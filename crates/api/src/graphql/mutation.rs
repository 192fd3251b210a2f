//! Mutation root.

use async_graphql::{Context, Object, Result};

use crate::context::RequestContext;
use crate::error::IntoFieldResult;
use crate::models::{SeedInput, SeedResult};
use crate::seed;

/// Write operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Replace all users and orders with generated data.
    ///
    /// Not atomic: a failure after the deletes leaves the store partially
    /// empty.
    async fn seed_database(&self, ctx: &Context<'_>, input: Option<SeedInput>) -> Result<SeedResult> {
        let request = ctx.data::<RequestContext>()?;
        seed::seed_database(request.business(), input.unwrap_or_default())
            .await
            .into_field_result()
    }
}
