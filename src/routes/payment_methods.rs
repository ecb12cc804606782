use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::lookups::{CreateLookupRequest, UpdateLookupRequest},
    error::AppResult,
    models::{Order, PaymentMethod},
    response::{ApiResponse, Deleted},
    services::lookup_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route("/{id}/orders", get(orders_with_payment_method))
        .route(
            "/{id}",
            get(get_payment_method).patch(update_payment_method).delete(delete_payment_method),
        )
}

#[utoipa::path(
    get,
    path = "/api/payment-methods",
    responses((status = 200, description = "All payment methods", body = ApiResponse<Vec<PaymentMethod>>)),
    tag = "Payment methods"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PaymentMethod>>>> {
    Ok(Json(lookup_service::list_payment_methods(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/payment-methods/{id}",
    params(("id" = i32, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Payment method", body = ApiResponse<PaymentMethod>),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "Payment methods"
)]
pub async fn get_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    Ok(Json(lookup_service::get_payment_method(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/payment-methods/{id}/orders",
    params(("id" = i32, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Orders paid with the method", body = ApiResponse<Vec<Order>>),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "Payment methods"
)]
pub async fn orders_with_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    Ok(Json(lookup_service::orders_with_payment_method(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/payment-methods",
    request_body = CreateLookupRequest,
    responses(
        (status = 201, description = "Payment method created", body = ApiResponse<PaymentMethod>),
        (status = 409, description = "Name already taken"),
    ),
    tag = "Payment methods"
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    Json(payload): Json<CreateLookupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentMethod>>)> {
    let resp = lookup_service::create_payment_method(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/payment-methods/{id}",
    params(("id" = i32, Path, description = "Payment method ID")),
    request_body = UpdateLookupRequest,
    responses(
        (status = 200, description = "Payment method updated", body = ApiResponse<PaymentMethod>),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "Payment methods"
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLookupRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    Ok(Json(lookup_service::update_payment_method(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/payment-methods/{id}",
    params(("id" = i32, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>),
        (status = 400, description = "Method is still referenced by orders"),
    ),
    tag = "Payment methods"
)]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(lookup_service::delete_payment_method(&state, id).await?))
}
