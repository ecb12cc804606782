use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::lookups::{CreateLookupRequest, UpdateLookupRequest},
    error::AppResult,
    models::{Order, OrderStatus},
    response::{ApiResponse, Deleted},
    services::lookup_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route("/{id}/orders", get(orders_with_status))
        .route(
            "/{id}",
            get(get_status).patch(update_status).delete(delete_status),
        )
}

#[utoipa::path(
    get,
    path = "/api/order-statuses",
    responses((status = 200, description = "All order statuses", body = ApiResponse<Vec<OrderStatus>>)),
    tag = "Order statuses"
)]
pub async fn list_statuses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<OrderStatus>>>> {
    Ok(Json(lookup_service::list_statuses(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-statuses/{id}",
    params(("id" = i32, Path, description = "Order status ID")),
    responses(
        (status = 200, description = "Order status", body = ApiResponse<OrderStatus>),
        (status = 404, description = "Order status not found"),
    ),
    tag = "Order statuses"
)]
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderStatus>>> {
    Ok(Json(lookup_service::get_status(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-statuses/{id}/orders",
    params(("id" = i32, Path, description = "Order status ID")),
    responses(
        (status = 200, description = "Orders currently in the status", body = ApiResponse<Vec<Order>>),
        (status = 404, description = "Order status not found"),
    ),
    tag = "Order statuses"
)]
pub async fn orders_with_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    Ok(Json(lookup_service::orders_with_status(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/order-statuses",
    request_body = CreateLookupRequest,
    responses(
        (status = 201, description = "Order status created", body = ApiResponse<OrderStatus>),
        (status = 409, description = "Name already taken"),
    ),
    tag = "Order statuses"
)]
pub async fn create_status(
    State(state): State<AppState>,
    Json(payload): Json<CreateLookupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderStatus>>)> {
    let resp = lookup_service::create_status(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/order-statuses/{id}",
    params(("id" = i32, Path, description = "Order status ID")),
    request_body = UpdateLookupRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderStatus>),
        (status = 404, description = "Order status not found"),
    ),
    tag = "Order statuses"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLookupRequest>,
) -> AppResult<Json<ApiResponse<OrderStatus>>> {
    Ok(Json(lookup_service::update_status(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/order-statuses/{id}",
    params(("id" = i32, Path, description = "Order status ID")),
    responses(
        (status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>),
        (status = 400, description = "Status is still referenced by orders"),
    ),
    tag = "Order statuses"
)]
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(lookup_service::delete_status(&state, id).await?))
}
