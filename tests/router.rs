mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use electronics_store_api::routes;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{create_category, create_product, create_user, setup_state};

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    Ok((status, body))
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::get(uri).body(Body::empty())?)
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn unknown_paths_get_the_json_envelope() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = routes::app(state);

    let (status, body) = send(&app, get("/api/nothing-here")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/api/nothing-here");
    Ok(())
}

#[tokio::test]
async fn missing_rows_and_bad_ids_map_to_status_codes() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = routes::app(state);

    let (status, body) = send(&app, get("/api/products/999")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["error"], "Not Found: product 999");

    let (status, _) = send(&app, get("/api/products/abc")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_over_http() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = routes::app(state);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/categories", json!({ "name": "Cameras" }))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap_or_default();
    assert!(id > 0);

    let (status, body) = send(&app, get(&format!("/api/categories/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Cameras");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/categories", json!({ "name": "" }))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request");
    Ok(())
}

#[tokio::test]
async fn cart_endpoints_accept_camel_case_bodies() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "http@example.com").await?;
    let category = create_category(&state, "Phones").await?;
    let product = create_product(&state, category, "Phone X", 89_900).await?;
    let app = routes::app(state);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/cart/add",
                json!({ "userId": user, "productId": product, "quantity": 2 }),
            )?,
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get(&format!("/api/cart/summary/{user}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cart_total"], 4 * 89_900);
    assert_eq!(body["data"]["items_count"], 1);

    let (status, body) = send(
        &app,
        json_request(
            "DELETE",
            "/api/cart/remove",
            json!({ "user_id": user, "product_id": product }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 1);
    Ok(())
}

#[tokio::test]
async fn reports_and_health_respond() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let app = routes::app(state);

    let (status, body) = send(&app, get("/api/users/top-spenders?months=6&limit=5")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);

    let (status, body) = send(&app, get("/api/products/inventory/stats?filter=all")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, get("/health/db")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = send(&app, get("/api/order-statuses")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 5);
    Ok(())
}
