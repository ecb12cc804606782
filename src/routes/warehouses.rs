use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        inventory::InventoryLine,
        warehouses::{CreateWarehouseRequest, UpdateWarehouseRequest},
    },
    error::AppResult,
    models::Warehouse,
    response::{ApiResponse, Deleted},
    routes::params::ThresholdQuery,
    services::warehouse_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route("/{id}/inventory", get(warehouse_inventory))
        .route("/{id}/low-stock", get(warehouse_low_stock))
        .route(
            "/{id}",
            get(get_warehouse)
                .patch(update_warehouse)
                .delete(delete_warehouse),
        )
}

#[utoipa::path(
    get,
    path = "/api/warehouses",
    responses((status = 200, description = "All warehouses", body = ApiResponse<Vec<Warehouse>>)),
    tag = "Warehouses"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Warehouse>>>> {
    Ok(Json(warehouse_service::list_warehouses(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse", body = ApiResponse<Warehouse>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "Warehouses"
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    Ok(Json(warehouse_service::get_warehouse(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}/inventory",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Stock held in the warehouse", body = ApiResponse<Vec<InventoryLine>>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "Warehouses"
)]
pub async fn warehouse_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLine>>>> {
    Ok(Json(warehouse_service::warehouse_inventory(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}/low-stock",
    params(("id" = i32, Path, description = "Warehouse ID"), ThresholdQuery),
    responses(
        (status = 200, description = "Rows below the threshold", body = ApiResponse<Vec<InventoryLine>>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "Warehouses"
)]
pub async fn warehouse_low_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ThresholdQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLine>>>> {
    Ok(Json(
        warehouse_service::warehouse_low_stock(&state, id, query.resolve()).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/warehouses",
    request_body = CreateWarehouseRequest,
    responses((status = 201, description = "Warehouse created", body = ApiResponse<Warehouse>)),
    tag = "Warehouses"
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<CreateWarehouseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Warehouse>>)> {
    let resp = warehouse_service::create_warehouse(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = UpdateWarehouseRequest,
    responses(
        (status = 200, description = "Warehouse updated", body = ApiResponse<Warehouse>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "Warehouses"
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWarehouseRequest>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    Ok(Json(warehouse_service::update_warehouse(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(warehouse_service::delete_warehouse(&state, id).await?))
}
