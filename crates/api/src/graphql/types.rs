//! Output object resolvers for stored documents.

use async_graphql::{Context, ID, Object, Result};

use quarry_core::{Email, Timestamp};

use crate::context::RequestContext;
use crate::error::IntoFieldResult;
use crate::models::{Order, User};

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID::from(self.id.as_str())
    }

    async fn first_name(&self) -> &str {
        &self.first_name
    }

    async fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Stored values that are not valid addresses fail this field only.
    async fn email(&self) -> Result<Email> {
        Email::serialize_str(&self.email).into_field_result()
    }

    /// Orders placed by this user, in store order.
    ///
    /// The field is nullable in the schema, but a user without orders gets
    /// an empty list.
    async fn orders(&self, ctx: &Context<'_>) -> Result<Option<Vec<Order>>> {
        let request = ctx.data::<RequestContext>()?;
        request
            .business()
            .orders
            .for_user(&self.id)
            .await
            .map(Some)
            .into_field_result()
    }
}

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID::from(self.id.as_str())
    }

    async fn user_id(&self) -> ID {
        ID::from(self.user_id.as_str())
    }

    async fn total(&self) -> f64 {
        self.total
    }

    async fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
