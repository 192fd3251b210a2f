//! User document.

use serde::{Deserialize, Serialize};

use quarry_core::UserId;

use crate::db::Document;

/// A user record as stored in the `users` collection.
///
/// `email` is kept as the raw stored string. It is validated by the `Email`
/// scalar when rendered, since documents inserted outside this service are
/// not checked on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// User's first name.
    pub first_name: String,
    /// User's last name.
    pub last_name: String,
    /// User's email address.
    pub email: String,
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}
