//! Seed request and result values. Neither is persisted.

use async_graphql::{InputObject, SimpleObject};

/// Number of users and orders to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, InputObject)]
pub struct SeedInput {
    /// Users to create (default 5).
    pub user_count: Option<i32>,
    /// Orders to create (default 10).
    pub order_count: Option<i32>,
}

/// Counts reported by the store after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SimpleObject)]
pub struct SeedResult {
    /// Users inserted.
    pub users_inserted: u64,
    /// Orders inserted.
    pub orders_inserted: u64,
}
