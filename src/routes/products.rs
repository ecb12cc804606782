use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reports::{InventoryStat, PopularProduct, ProductAnalytics, SalesStatistic},
    },
    error::AppResult,
    models::Product,
    response::{ApiResponse, Deleted},
    routes::params::{InventoryStatsQuery, LimitQuery, SalesStatisticsQuery},
    services::{product_service, report_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/popular", get(popular_products))
        .route("/available", get(available_products))
        .route("/analytics", get(product_analytics))
        .route("/sales-statistics", get(sales_statistics))
        .route("/inventory/stats", get(inventory_stats))
        .route("/category/{id}", get(products_by_category))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "All products", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::list_products(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/available",
    responses((status = 200, description = "Products flagged available", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn available_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::list_available(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/category/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<ProductList>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Products"
)]
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::list_by_category(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/popular",
    params(LimitQuery),
    responses((status = 200, description = "Best sellers of the last three months", body = ApiResponse<Vec<PopularProduct>>)),
    tag = "Products"
)]
pub async fn popular_products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<Vec<PopularProduct>>>> {
    Ok(Json(report_service::popular_products(&state, query.resolve()).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/analytics",
    responses((status = 200, description = "Sales and review analytics", body = ApiResponse<Vec<ProductAnalytics>>)),
    tag = "Products"
)]
pub async fn product_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductAnalytics>>>> {
    Ok(Json(report_service::product_analytics(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/sales-statistics",
    params(SalesStatisticsQuery),
    responses((status = 200, description = "Sales next to current stock", body = ApiResponse<Vec<SalesStatistic>>)),
    tag = "Products"
)]
pub async fn sales_statistics(
    State(state): State<AppState>,
    Query(query): Query<SalesStatisticsQuery>,
) -> AppResult<Json<ApiResponse<Vec<SalesStatistic>>>> {
    let (months, limit) = query.resolve();
    Ok(Json(report_service::sales_statistics(&state, months, limit).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/inventory/stats",
    params(InventoryStatsQuery),
    responses((status = 200, description = "Stock per available product", body = ApiResponse<Vec<InventoryStat>>)),
    tag = "Products"
)]
pub async fn inventory_stats(
    State(state): State<AppState>,
    Query(query): Query<InventoryStatsQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryStat>>>> {
    let filter = query.filter.unwrap_or_default();
    Ok(Json(report_service::inventory_stats(&state, filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(product_service::get_product(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(product_service::update_product(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(product_service::delete_product(&state, id).await?))
}
