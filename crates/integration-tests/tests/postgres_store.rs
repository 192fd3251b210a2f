//! `PgCollection` against a real database.
//!
//! Skipped unless `QUARRY_TEST_DATABASE_URL` points at a disposable
//! database. The tests share the `documents` table, so they run as one.

use quarry_api::db::{self, Collections, RepositoryError};
use quarry_api::models::SeedInput;
use quarry_api::seed::seed_database;
use quarry_integration_tests::{fixed_timestamp, order, user};
use secrecy::SecretString;

async fn pool() -> Option<sqlx::PgPool> {
    let url = std::env::var("QUARRY_TEST_DATABASE_URL").ok()?;
    let pool = db::create_pool(&SecretString::from(url), 2)
        .await
        .unwrap_or_else(|e| panic!("connect: {e}"));
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .unwrap_or_else(|e| panic!("migrate: {e}"));
    Some(pool)
}

#[tokio::test]
async fn test_postgres_collections() {
    let Some(pool) = pool().await else {
        return;
    };
    let collections = Collections::postgres(&pool);

    collections.orders.delete_all().await.unwrap_or_else(|e| panic!("{e}"));
    collections.users.delete_all().await.unwrap_or_else(|e| panic!("{e}"));

    let alice = user("Alice", "Smith", "alice@example.com");
    let bob = user("Bob", "Smith", "bob@example.com");
    let inserted = collections
        .users
        .insert_many(&[alice.clone(), bob.clone()])
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(inserted, 2);

    let all = collections.users.all().await.unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(all, vec![alice.clone(), bob.clone()]);

    let found = collections
        .users
        .get_by_last_name("Smith")
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(found, Some(alice.clone()));

    let missing = collections
        .users
        .get_by_id("does-not-exist")
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(missing, None);

    let duplicate = collections.users.insert_many(std::slice::from_ref(&alice)).await;
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    let placed = order(&bob, 12.34, fixed_timestamp());
    collections
        .orders
        .insert_many(std::slice::from_ref(&placed))
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    let bobs = collections
        .orders
        .for_user(&bob.id)
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(bobs, vec![placed]);
    assert!(
        collections
            .orders
            .for_user(&alice.id)
            .await
            .unwrap_or_else(|e| panic!("{e}"))
            .is_empty()
    );

    let result = seed_database(
        &collections,
        SeedInput {
            user_count: Some(20),
            order_count: Some(50),
        },
    )
    .await
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(result.users_inserted, 20);
    assert_eq!(result.orders_inserted, 50);
    assert_eq!(collections.users.all().await.unwrap_or_default().len(), 20);

    pool.close().await;
}
