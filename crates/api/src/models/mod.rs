//! Domain models.
//!
//! These types are the documents stored in each collection plus the
//! transient seed input and result values.

pub mod order;
pub mod seed;
pub mod user;

pub use order::Order;
pub use seed::{SeedInput, SeedResult};
pub use user::User;
