use chrono::{SubsecRound, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;
use validator::Validate;

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        categories::Entity as Categories,
        products::{ActiveModel, Column, Entity as Products},
    },
    error::AppResult,
    models::Product,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn list_available(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .filter(Column::IsAvailable.eq(true))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    tracing::debug!(count = items.len(), "available products");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Available products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn list_by_category(
    state: &AppState,
    category_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    crud::find_or_404::<Categories, _>(&state.orm, "category", category_id).await?;
    let items: Vec<Product> = Products::find()
        .filter(Column::CategoryId.eq(category_id))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Category products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = crud::find_or_404::<Products, _>(&state.orm, "product", id).await?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    crud::find_or_404::<Categories, _>(&state.orm, "category", payload.category_id).await?;

    // Millisecond precision, matching what the update trigger writes.
    let now = Utc::now().trunc_subsecs(3);
    let product = ActiveModel {
        id: NotSet,
        category_id: Set(payload.category_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        stock_quantity: Set(payload.stock_quantity),
        image_url: Set(payload.image_url),
        weight: Set(payload.weight),
        dimensions: Set(payload.dimensions),
        is_available: Set(payload.is_available),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = product.id, price = product.price, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let existing = crud::find_or_404::<Products, _>(&state.orm, "product", id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(category_id) = payload.category_id {
        crud::find_or_404::<Categories, _>(&state.orm, "category", category_id).await?;
        active.category_id = Set(category_id);
    }
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        active.stock_quantity = Set(stock_quantity);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(weight) = payload.weight {
        active.weight = Set(Some(weight));
    }
    if let Some(dimensions) = payload.dimensions {
        active.dimensions = Set(Some(dimensions));
    }
    if let Some(is_available) = payload.is_available {
        active.is_available = Set(is_available);
    }

    // `updated_at` is refreshed by the `update_product_timestamp` trigger, which
    // runs after the statement, so the row is read back once written.
    if active.is_changed() {
        active.update(&state.orm).await?;
    }
    let product = crud::find_or_404::<Products, _>(&state.orm, "product", id).await?;
    tracing::info!(product_id = product.id, "product updated");
    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Products, _>(&state.orm, "product", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}
