use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

/// Row counts of the busiest tables, as seen by the pool.
#[derive(Debug, Serialize, ToSchema)]
pub struct DbHealthData {
    pub status: String,
    pub users: i64,
    pub products: i64,
    pub cart_items: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/health/db",
    responses(
        (status = 200, description = "Database reachable", body = ApiResponse<DbHealthData>),
        (status = 500, description = "Database unavailable"),
    ),
    tag = "Health"
)]
pub async fn db_health_check(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DbHealthData>>> {
    let (users, products, cart_items): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT (SELECT COUNT(*) FROM users),
               (SELECT COUNT(*) FROM products),
               (SELECT COUNT(*) FROM cart_items)
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    let data = DbHealthData {
        status: "ok".to_string(),
        users,
        products,
        cart_items,
    };
    Ok(Json(ApiResponse::success(
        "Database health check",
        data,
        Some(Meta::empty()),
    )))
}
