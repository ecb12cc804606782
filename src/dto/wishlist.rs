use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWishlistRequest {
    pub user_id: i32,
    pub product_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWishlistRequest {
    pub user_id: Option<i32>,
    pub product_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct WishlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub added_date: DateTime<Utc>,
    pub product_name: String,
    pub price: i64,
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WishlistCheck {
    pub user_id: i32,
    pub product_id: i32,
    pub in_wishlist: bool,
}
