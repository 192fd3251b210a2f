//! Order document.

use serde::{Deserialize, Serialize};

use quarry_core::{OrderId, Timestamp, UserId};

use crate::db::Document;

/// An order record as stored in the `orders` collection.
///
/// `user_id` points at a [`User`](super::User) by convention only; nothing
/// in the store enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// ID of the user who placed the order.
    pub user_id: UserId,
    /// Total amount of the order.
    pub total: f64,
    /// When the order was created.
    pub created_at: Timestamp,
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}
