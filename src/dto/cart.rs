use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Body of `POST /cart/add` and `POST /cart`. Quantity defaults to one.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCartQuantityRequest {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RemoveFromCartRequest {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
}

/// Patch for a cart line addressed by its own id.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i32>,
}

/// A cart line joined with the product it refers to.
#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub added_date: DateTime<Utc>,
    pub product_name: String,
    pub price: i64,
    pub line_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, FromRow)]
pub struct CartSummary {
    pub user_id: i32,
    pub email: String,
    /// Sum of quantity times current product price, in cents.
    pub cart_total: i64,
    pub items_count: i64,
    pub total_quantity: i64,
}
