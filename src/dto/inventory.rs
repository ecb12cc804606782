use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInventoryRequest {
    pub product_id: i32,
    pub warehouse_id: i32,
    pub quantity: i32,
    pub last_restock_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateInventoryRequest {
    pub product_id: Option<i32>,
    pub warehouse_id: Option<i32>,
    pub quantity: Option<i32>,
    pub last_restock_date: Option<DateTime<Utc>>,
}

/// Body of `PATCH /inventory/stock/{productId}/{warehouseId}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub quantity: i32,
}

/// Inventory row joined with product and warehouse names.
#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct InventoryLine {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub quantity: i32,
    pub last_restock_date: Option<DateTime<Utc>>,
}
