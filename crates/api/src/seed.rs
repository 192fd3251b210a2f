//! Synthetic seed data.
//!
//! Users are generated deterministically from their 1-based index; orders
//! pick a random owner from the same batch, so every generated order points
//! at an existing user.

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::{info, instrument};

use quarry_core::{OrderId, Timestamp, UserId};

use crate::db::{Collections, RepositoryError};
use crate::models::{Order, SeedInput, SeedResult, User};

/// Users generated when the input does not say.
pub const DEFAULT_USER_COUNT: i32 = 5;

/// Orders generated when the input does not say.
pub const DEFAULT_ORDER_COUNT: i32 = 10;

/// Largest count accepted for either collection in one seed call.
pub const MAX_SEED_COUNT: i32 = 100_000;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The request cannot be satisfied as given.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Generate `count` users named `User 1` .. `User {count}`.
#[must_use]
pub fn generate_users(count: usize) -> Vec<User> {
    (1..=count)
        .map(|index| User {
            id: UserId::generate(),
            first_name: "User".to_string(),
            last_name: index.to_string(),
            email: format!("user{index}@example.com"),
        })
        .collect()
}

/// Generate `count` orders owned by random users from `users`.
///
/// # Errors
///
/// Returns `SeedError::InvalidArgument` if `users` is empty and `count > 0`.
pub fn generate_orders(users: &[User], count: usize) -> Result<Vec<Order>, SeedError> {
    generate_orders_with(&mut rand::rng(), users, count)
}

/// Generate orders using the supplied random source.
///
/// Totals are whole cents in `[0.00, 100.00)`.
///
/// # Errors
///
/// Returns `SeedError::InvalidArgument` if `users` is empty and `count > 0`.
pub fn generate_orders_with<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[User],
    count: usize,
) -> Result<Vec<Order>, SeedError> {
    (0..count)
        .map(|_| {
            let owner = users.choose(rng).ok_or_else(|| {
                SeedError::InvalidArgument("cannot generate orders without users".to_string())
            })?;
            let cents = rng.random_range(0..10_000_u32);

            Ok(Order {
                id: OrderId::generate(),
                user_id: owner.id.clone(),
                total: f64::from(cents) / 100.0,
                created_at: Timestamp::now(),
            })
        })
        .collect()
}

/// Replace the contents of both collections with fresh seed data.
///
/// Missing counts fall back to [`DEFAULT_USER_COUNT`] and
/// [`DEFAULT_ORDER_COUNT`]. Both collections are emptied before inserting;
/// if an insert fails afterwards the store is left partially empty.
///
/// # Errors
///
/// Returns `SeedError::InvalidArgument` for negative counts, counts above
/// [`MAX_SEED_COUNT`], or orders without users. Returns
/// `SeedError::Repository` if a store call fails.
#[instrument(skip(collections))]
pub async fn seed_database(
    collections: &Collections,
    input: SeedInput,
) -> Result<SeedResult, SeedError> {
    let user_count = resolve_count(input.user_count, DEFAULT_USER_COUNT, "userCount")?;
    let order_count = resolve_count(input.order_count, DEFAULT_ORDER_COUNT, "orderCount")?;

    let users = generate_users(user_count);
    let orders = generate_orders(&users, order_count)?;

    let removed_users = collections.users.delete_all().await?;
    let removed_orders = collections.orders.delete_all().await?;
    info!(removed_users, removed_orders, "Cleared collections");

    let users_inserted = collections.users.insert_many(&users).await?;
    let orders_inserted = collections.orders.insert_many(&orders).await?;
    info!(users_inserted, orders_inserted, "Seeded database");

    Ok(SeedResult {
        users_inserted,
        orders_inserted,
    })
}

fn resolve_count(value: Option<i32>, default: i32, name: &str) -> Result<usize, SeedError> {
    let count = value.unwrap_or(default);
    if count > MAX_SEED_COUNT {
        return Err(SeedError::InvalidArgument(format!(
            "{name} must be at most {MAX_SEED_COUNT}, got {count}"
        )));
    }
    usize::try_from(count)
        .map_err(|_| SeedError::InvalidArgument(format!("{name} must not be negative, got {count}")))
}
