use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    db::DbPool,
    dto::inventory::{
        CreateInventoryRequest, InventoryLine, UpdateInventoryRequest, UpdateStockRequest,
    },
    entity::{
        inventory::{ActiveModel, Column, Entity as Inventory},
        products::Entity as Products,
        warehouses::Entity as Warehouses,
    },
    error::{AppError, AppResult},
    models::InventoryItem,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

const INVENTORY_LINES: &str = r#"
    SELECT i.id, i.product_id, p.name AS product_name,
           i.warehouse_id, w.name AS warehouse_name,
           i.quantity, i.last_restock_date
    FROM inventory i
    JOIN products p ON p.id = i.product_id
    JOIN warehouses w ON w.id = i.warehouse_id
"#;

fn ensure_stock(quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::BadRequest(
            "inventory quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn lines_for_warehouse(
    pool: &DbPool,
    warehouse_id: i32,
) -> AppResult<Vec<InventoryLine>> {
    let sql = format!("{INVENTORY_LINES} WHERE i.warehouse_id = ?1 ORDER BY p.name, i.id");
    Ok(sqlx::query_as::<_, InventoryLine>(&sql)
        .bind(warehouse_id)
        .fetch_all(pool)
        .await?)
}

/// Inventory rows with `quantity < threshold`, optionally for one warehouse.
pub(crate) async fn low_stock_lines(
    pool: &DbPool,
    threshold: i32,
    warehouse_id: Option<i32>,
) -> AppResult<Vec<InventoryLine>> {
    let sql = format!(
        "{INVENTORY_LINES} WHERE i.quantity < ?1 AND (?2 IS NULL OR i.warehouse_id = ?2) \
         ORDER BY i.quantity, i.id"
    );
    let lines = sqlx::query_as::<_, InventoryLine>(&sql)
        .bind(threshold)
        .bind(warehouse_id)
        .fetch_all(pool)
        .await?;
    tracing::debug!(threshold, ?warehouse_id, rows = lines.len(), "low stock");
    Ok(lines)
}

pub async fn list_inventory(state: &AppState) -> AppResult<ApiResponse<Vec<InventoryItem>>> {
    let items: Vec<InventoryItem> = Inventory::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(InventoryItem::from)
        .collect();
    Ok(ApiResponse::list("Inventory", items))
}

pub async fn get_inventory_item(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<InventoryItem>> {
    let item = crud::find_or_404::<Inventory, _>(&state.orm, "inventory item", id).await?;
    Ok(ApiResponse::success("Inventory item", item.into(), None))
}

pub async fn create_inventory_item(
    state: &AppState,
    payload: CreateInventoryRequest,
) -> AppResult<ApiResponse<InventoryItem>> {
    ensure_stock(payload.quantity)?;
    crud::find_or_404::<Products, _>(&state.orm, "product", payload.product_id).await?;
    crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", payload.warehouse_id).await?;

    let item = ActiveModel {
        id: NotSet,
        product_id: Set(payload.product_id),
        warehouse_id: Set(payload.warehouse_id),
        quantity: Set(payload.quantity),
        last_restock_date: Set(payload.last_restock_date),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        inventory_id = item.id,
        product_id = item.product_id,
        warehouse_id = item.warehouse_id,
        quantity = item.quantity,
        "inventory row created"
    );
    Ok(ApiResponse::success(
        "Inventory item created",
        item.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_inventory_item(
    state: &AppState,
    id: i32,
    payload: UpdateInventoryRequest,
) -> AppResult<ApiResponse<InventoryItem>> {
    let existing = crud::find_or_404::<Inventory, _>(&state.orm, "inventory item", id).await?;
    let mut active: ActiveModel = existing.into();
    if let Some(product_id) = payload.product_id {
        crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;
        active.product_id = Set(product_id);
    }
    if let Some(warehouse_id) = payload.warehouse_id {
        crud::find_or_404::<Warehouses, _>(&state.orm, "warehouse", warehouse_id).await?;
        active.warehouse_id = Set(warehouse_id);
    }
    if let Some(quantity) = payload.quantity {
        ensure_stock(quantity)?;
        active.quantity = Set(quantity);
    }
    if let Some(last_restock_date) = payload.last_restock_date {
        active.last_restock_date = Set(Some(last_restock_date));
    }
    let item = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", item.into(), Some(Meta::empty())))
}

pub async fn delete_inventory_item(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Inventory, _>(&state.orm, "inventory item", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn product_inventory(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;
    let sql = format!("{INVENTORY_LINES} WHERE i.product_id = ?1 ORDER BY w.name, i.id");
    let lines = sqlx::query_as::<_, InventoryLine>(&sql)
        .bind(product_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(ApiResponse::list("Product inventory", lines))
}

pub async fn low_stock(
    state: &AppState,
    threshold: i32,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    let lines = low_stock_lines(&state.pool, threshold, None).await?;
    Ok(ApiResponse::list("Low stock", lines))
}

/// Set the stock of a product in a warehouse and stamp the restock date.
pub async fn update_stock(
    state: &AppState,
    product_id: i32,
    warehouse_id: i32,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<Vec<InventoryItem>>> {
    ensure_stock(payload.quantity)?;
    let items = sqlx::query_as::<_, InventoryItem>(
        r#"
        UPDATE inventory
        SET quantity = ?3, last_restock_date = ?4
        WHERE product_id = ?1 AND warehouse_id = ?2
        RETURNING id, product_id, warehouse_id, quantity, last_restock_date
        "#,
    )
    .bind(product_id)
    .bind(warehouse_id)
    .bind(payload.quantity)
    .bind(Utc::now())
    .fetch_all(&state.pool)
    .await?;

    if items.is_empty() {
        tracing::warn!(product_id, warehouse_id, "no inventory row to restock");
        return Err(AppError::NotFound(format!(
            "inventory for product {product_id} in warehouse {warehouse_id}"
        )));
    }

    tracing::info!(
        product_id,
        warehouse_id,
        quantity = payload.quantity,
        "stock updated"
    );
    Ok(ApiResponse::list("Stock updated", items))
}
