use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};

use crate::{
    dto::orders::{
        AddOrderDetailRequest, CreateOrderRequest, OrderDetailWithProduct, OrderWithDetails,
        OrderWithProducts, UpdateOrderRequest,
    },
    error::AppResult,
    models::Order,
    response::{ApiResponse, Deleted},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/detail", post(add_order_detail))
        .route("/user/{id}", get(user_orders))
        .route("/{id}/status/{status_id}", patch(update_order_status))
        .route("/{id}/details", get(order_details))
        .route(
            "/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses((status = 200, description = "All orders", body = ApiResponse<Vec<Order>>)),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    Ok(Json(order_service::list_orders(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its lines", body = ApiResponse<OrderWithDetails>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderWithDetails>>> {
    Ok(Json(order_service::get_order(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderWithDetails>),
        (status = 400, description = "Invalid lines, address or total"),
        (status = 404, description = "User, product or lookup row not found"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithDetails>>)> {
    let resp = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/orders/detail",
    request_body = AddOrderDetailRequest,
    responses(
        (status = 201, description = "Line added and total recomputed", body = ApiResponse<OrderWithDetails>),
        (status = 404, description = "Order or product not found"),
    ),
    tag = "Orders"
)]
pub async fn add_order_detail(
    State(state): State<AppState>,
    Json(payload): Json<AddOrderDetailRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithDetails>>)> {
    let resp = order_service::add_order_detail(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Orders of the user with their products", body = ApiResponse<Vec<OrderWithProducts>>),
        (status = 404, description = "User not found"),
    ),
    tag = "Orders"
)]
pub async fn user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<OrderWithProducts>>>> {
    Ok(Json(order_service::user_orders(&state, user_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status/{status_id}",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("status_id" = i32, Path, description = "Target status ID"),
    ),
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<Order>),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Order or status not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path((order_id, status_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::update_order_status(&state, order_id, status_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/details",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order lines with products", body = ApiResponse<Vec<OrderDetailWithProduct>>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn order_details(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<OrderDetailWithProduct>>>> {
    Ok(Json(order_service::order_details(&state, order_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<Order>),
        (status = 400, description = "Invalid change"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::update_order(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(order_service::delete_order(&state, id).await?))
}
