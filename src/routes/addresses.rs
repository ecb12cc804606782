use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::addresses::{CreateAddressRequest, UpdateAddressRequest},
    error::AppResult,
    models::Address,
    response::{ApiResponse, Deleted},
    services::address_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(create_address))
        .route("/user/{id}", get(user_addresses))
        .route("/user/{id}/default/{address_id}", patch(set_default_address))
        .route(
            "/{id}",
            get(get_address).patch(update_address).delete(delete_address),
        )
}

#[utoipa::path(
    get,
    path = "/api/addresses",
    responses((status = 200, description = "All addresses", body = ApiResponse<Vec<Address>>)),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Address>>>> {
    Ok(Json(address_service::list_addresses(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/addresses/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Addresses of the user, default first", body = ApiResponse<Vec<Address>>),
        (status = 404, description = "User not found"),
    ),
    tag = "Addresses"
)]
pub async fn user_addresses(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Address>>>> {
    Ok(Json(address_service::user_addresses(&state, user_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/addresses/user/{id}/default/{address_id}",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("address_id" = i32, Path, description = "Address ID"),
    ),
    responses(
        (status = 200, description = "Address is now the user's only default", body = ApiResponse<Address>),
        (status = 404, description = "Address does not belong to the user"),
    ),
    tag = "Addresses"
)]
pub async fn set_default_address(
    State(state): State<AppState>,
    Path((user_id, address_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(
        address_service::set_default_address(&state, user_id, address_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    params(("id" = i32, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address", body = ApiResponse<Address>),
        (status = 404, description = "Address not found"),
    ),
    tag = "Addresses"
)]
pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(address_service::get_address(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address created", body = ApiResponse<Address>),
        (status = 404, description = "User not found"),
    ),
    tag = "Addresses"
)]
pub async fn create_address(
    State(state): State<AppState>,
    Json(payload): Json<CreateAddressRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Address>>)> {
    let resp = address_service::create_address(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/addresses/{id}",
    params(("id" = i32, Path, description = "Address ID")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<Address>),
        (status = 404, description = "Address not found"),
    ),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAddressRequest>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(address_service::update_address(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    params(("id" = i32, Path, description = "Address ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(address_service::delete_address(&state, id).await?))
}
