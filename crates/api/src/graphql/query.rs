//! Query root.

use async_graphql::{Context, ID, Object, Result};

use crate::context::RequestContext;
use crate::error::IntoFieldResult;
use crate::models::{Order, User};

/// Read operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users in store order.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let request = ctx.data::<RequestContext>()?;
        request.business().users.all().await.into_field_result()
    }

    /// The user with the given id, or null.
    async fn user_by_id(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<User>> {
        let Some(id) = non_empty(id.map(|id| id.0)) else {
            return Ok(None);
        };
        let request = ctx.data::<RequestContext>()?;
        request
            .business()
            .users
            .get_by_id(&id)
            .await
            .into_field_result()
    }

    /// The first user whose last name is exactly `name`, or null.
    async fn user_by_name(&self, ctx: &Context<'_>, name: Option<String>) -> Result<Option<User>> {
        let Some(name) = non_empty(name) else {
            return Ok(None);
        };
        let request = ctx.data::<RequestContext>()?;
        request
            .business()
            .users
            .get_by_last_name(&name)
            .await
            .into_field_result()
    }

    /// All orders in store order.
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let request = ctx.data::<RequestContext>()?;
        request.business().orders.all().await.into_field_result()
    }

    /// The order with the given id, or null.
    async fn order(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Order>> {
        let Some(id) = non_empty(id.map(|id| id.0)) else {
            return Ok(None);
        };
        let request = ctx.data::<RequestContext>()?;
        request
            .business()
            .orders
            .get_by_id(&id)
            .await
            .into_field_result()
    }
}

/// An empty argument counts as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
