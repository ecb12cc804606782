use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::inventory::{
        CreateInventoryRequest, InventoryLine, UpdateInventoryRequest, UpdateStockRequest,
    },
    error::AppResult,
    models::InventoryItem,
    response::{ApiResponse, Deleted},
    routes::params::ThresholdQuery,
    services::{inventory_service, warehouse_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory_item))
        .route("/low-stock", get(low_stock))
        .route("/product/{id}", get(product_inventory))
        .route("/warehouse/{id}", get(inventory_by_warehouse))
        .route("/stock/{id}/{warehouse_id}", patch(update_stock))
        .route(
            "/{id}",
            get(get_inventory_item)
                .patch(update_inventory_item)
                .delete(delete_inventory_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    responses((status = 200, description = "Every inventory row", body = ApiResponse<Vec<InventoryItem>>)),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    Ok(Json(inventory_service::list_inventory(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    params(ThresholdQuery),
    responses((status = 200, description = "Rows strictly below the threshold", body = ApiResponse<Vec<InventoryLine>>)),
    tag = "Inventory"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    Query(query): Query<ThresholdQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLine>>>> {
    Ok(Json(inventory_service::low_stock(&state, query.resolve()).await?))
}

#[utoipa::path(
    get,
    path = "/api/inventory/product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock of the product per warehouse", body = ApiResponse<Vec<InventoryLine>>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Inventory"
)]
pub async fn product_inventory(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLine>>>> {
    Ok(Json(inventory_service::product_inventory(&state, product_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/inventory/warehouse/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Stock held in the warehouse", body = ApiResponse<Vec<InventoryLine>>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "Inventory"
)]
pub async fn inventory_by_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLine>>>> {
    Ok(Json(
        warehouse_service::warehouse_inventory(&state, warehouse_id).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/inventory/stock/{id}/{warehouse_id}",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("warehouse_id" = i32, Path, description = "Warehouse ID"),
    ),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock replaced and restock date set", body = ApiResponse<Vec<InventoryItem>>),
        (status = 400, description = "Negative quantity"),
        (status = 404, description = "No inventory row for the pair"),
    ),
    tag = "Inventory"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    Ok(Json(
        inventory_service::update_stock(&state, product_id, warehouse_id, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory row ID")),
    responses(
        (status = 200, description = "Inventory row", body = ApiResponse<InventoryItem>),
        (status = 404, description = "Inventory row not found"),
    ),
    tag = "Inventory"
)]
pub async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    Ok(Json(inventory_service::get_inventory_item(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = CreateInventoryRequest,
    responses(
        (status = 201, description = "Inventory row created", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Negative quantity"),
    ),
    tag = "Inventory"
)]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateInventoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<InventoryItem>>)> {
    let resp = inventory_service::create_inventory_item(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory row ID")),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Inventory row updated", body = ApiResponse<InventoryItem>),
        (status = 404, description = "Inventory row not found"),
    ),
    tag = "Inventory"
)]
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    Ok(Json(inventory_service::update_inventory_item(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory row ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Inventory"
)]
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(inventory_service::delete_inventory_item(&state, id).await?))
}
