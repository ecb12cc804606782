mod common;

use axum::extract::State;
use electronics_store_api::routes::health::{db_health_check, health_check};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn db_health_counts_rows() -> anyhow::Result<()> {
    let (state, _dir) = common::setup_state().await?;
    let category = common::create_category(&state, "Audio").await?;
    common::create_product(&state, category, "Speaker", 7_900).await?;
    common::create_user(&state, "health@example.com").await?;

    let response = db_health_check(State(state)).await?;
    let data = response.0.data.expect("db health data");
    assert_eq!(data.status, "ok");
    assert_eq!((data.users, data.products, data.cart_items), (1, 1, 0));
    Ok(())
}
