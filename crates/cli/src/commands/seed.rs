//! Seed the database with synthetic users and orders.
//!
//! Runs the same routine as the `seedDatabase` mutation against the
//! configured `PostgreSQL` database. Existing users and orders are deleted.

use tracing::info;

use quarry_api::config::database_url_from_env;
use quarry_api::db::{self, Collections};
use quarry_api::models::SeedInput;
use quarry_api::seed::seed_database;

/// Connections needed for a one-shot seed.
const SEED_POOL_SIZE: u32 = 2;

/// Seed `users` users and `orders` orders.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or seeding is rejected.
pub async fn run(users: i32, orders: i32) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url_from_env()?;

    let pool = db::create_pool(&database_url, SEED_POOL_SIZE).await?;
    info!("Connected to database");

    let input = SeedInput {
        user_count: Some(users),
        order_count: Some(orders),
    };
    let result = seed_database(&Collections::postgres(&pool), input).await;
    pool.close().await;
    let result = result?;

    info!(
        users_inserted = result.users_inserted,
        orders_inserted = result.orders_inserted,
        "Seeding complete"
    );
    Ok(())
}
