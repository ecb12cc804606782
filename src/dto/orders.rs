use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{Order, OrderDetail, Product};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: i32,
    pub quantity: i32,
    /// Defaults to the product's current price.
    pub price_per_unit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user_id: i32,
    pub payment_method_id: i32,
    pub shipping_address_id: i32,
    /// Defaults to the `Pending` status.
    pub status_id: Option<i32>,
    #[serde(default)]
    pub delivery_price: i64,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    /// When present it must equal the sum of the lines.
    pub total_price: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

/// `total_price` is derived from the detail lines and cannot be patched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status_id: Option<i32>,
    pub payment_method_id: Option<i32>,
    pub shipping_address_id: Option<i32>,
    pub delivery_price: Option<i64>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddOrderDetailRequest {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_per_unit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct OrderProductLine {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price_per_unit: i64,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithProducts {
    pub order_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub payment_method: String,
    pub total_price: i64,
    pub delivery_price: i64,
    pub tracking_number: Option<String>,
    pub products: Vec<OrderProductLine>,
    pub products_count: i64,
    pub total_items: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetailWithProduct {
    #[serde(flatten)]
    pub detail: OrderDetail,
    pub line_total: i64,
    pub product: Option<Product>,
}

/// An order header together with its detail lines.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub details: Vec<OrderDetail>,
}
