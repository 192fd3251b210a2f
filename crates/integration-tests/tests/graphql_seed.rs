//! The `seedDatabase` mutation.

use std::collections::HashSet;

use serde_json::json;

use quarry_integration_tests::{TestContext, data, first_error_code, user};

const SEED: &str = "mutation($input: SeedInput) { \
    seedDatabase(input: $input) { usersInserted ordersInserted } }";

#[tokio::test]
async fn test_seed_defaults() {
    let ctx = TestContext::new();

    let response = ctx.execute("mutation { seedDatabase { usersInserted ordersInserted } }").await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        data(response),
        json!({ "seedDatabase": { "usersInserted": 5, "ordersInserted": 10 } })
    );
    assert_eq!(ctx.users.len().await, 5);
    assert_eq!(ctx.orders.len().await, 10);
}

#[tokio::test]
async fn test_seed_replaces_existing_documents() {
    let existing = user("Old", "Timer", "old@example.com");
    let ctx = TestContext::with_documents(std::slice::from_ref(&existing), &[]).await;

    let response = ctx
        .execute_with(SEED, json!({ "input": { "userCount": 20, "orderCount": 50 } }))
        .await;
    assert_eq!(
        data(response),
        json!({ "seedDatabase": { "usersInserted": 20, "ordersInserted": 50 } })
    );

    let value = data(ctx.execute("{ users { id lastName email } orders { userId total createdAt } }").await);
    let users = value["users"].as_array().cloned().unwrap_or_default();
    let orders = value["orders"].as_array().cloned().unwrap_or_default();
    assert_eq!(users.len(), 20);
    assert_eq!(orders.len(), 50);

    let ids: HashSet<&str> = users.iter().filter_map(|u| u["id"].as_str()).collect();
    assert_eq!(ids.len(), 20);
    assert!(!ids.contains(existing.id.as_str()));

    for (i, u) in users.iter().enumerate() {
        assert_eq!(u["lastName"], json!((i + 1).to_string()));
        assert_eq!(u["email"], json!(format!("user{}@example.com", i + 1)));
    }

    for o in &orders {
        let owner = o["userId"].as_str().unwrap_or_default();
        assert!(ids.contains(owner), "order points at unknown user {owner}");
        let total = o["total"].as_f64().unwrap_or(-1.0);
        assert!((0.0..100.0).contains(&total));
        let created_at = o["createdAt"].as_str().unwrap_or_default();
        assert!(created_at.ends_with('Z') && created_at.len() == 24, "{created_at}");
    }
}

#[tokio::test]
async fn test_seed_nothing() {
    let ctx = TestContext::new();
    let response = ctx
        .execute_with(SEED, json!({ "input": { "userCount": 0, "orderCount": 0 } }))
        .await;
    assert_eq!(
        data(response),
        json!({ "seedDatabase": { "usersInserted": 0, "ordersInserted": 0 } })
    );
}

#[tokio::test]
async fn test_seed_rejects_orders_without_users() {
    let ctx = TestContext::new();
    let response = ctx
        .execute_with(SEED, json!({ "input": { "userCount": 0, "orderCount": 3 } }))
        .await;
    assert_eq!(first_error_code(&response).as_deref(), Some("INVALID_ARGUMENT"));
    assert_eq!(data(response), serde_json::Value::Null);
}

#[tokio::test]
async fn test_seed_rejects_negative_counts() {
    let ctx = TestContext::new();
    let response = ctx
        .execute_with(SEED, json!({ "input": { "userCount": -2 } }))
        .await;
    assert_eq!(first_error_code(&response).as_deref(), Some("INVALID_ARGUMENT"));
    assert_eq!(ctx.users.len().await, 0);
}

#[tokio::test]
async fn test_seed_rejects_oversized_counts() {
    let existing = user("Old", "Timer", "old@example.com");
    let ctx = TestContext::with_documents(std::slice::from_ref(&existing), &[]).await;
    let response = ctx
        .execute_with(SEED, json!({ "input": { "userCount": 2_000_000_000 } }))
        .await;
    assert_eq!(first_error_code(&response).as_deref(), Some("INVALID_ARGUMENT"));
    assert_eq!(ctx.users.len().await, 1);
}
