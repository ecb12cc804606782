use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::entity;

/// Public view of a user. The password hash never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub registration_date: DateTime<Utc>,
    pub is_admin: bool,
    pub last_login_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<i32>,
}

/// `price` is in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub apartment: Option<String>,
    pub postal_code: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderStatus {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Amounts are in cents; `total_price` excludes `delivery_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status_id: i32,
    pub payment_method_id: i32,
    pub shipping_address_id: i32,
    pub order_date: DateTime<Utc>,
    pub total_price: i64,
    pub delivery_price: i64,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_per_unit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WishlistItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub manager_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct InventoryItem {
    pub id: i32,
    pub product_id: i32,
    pub warehouse_id: i32,
    pub quantity: i32,
    pub last_restock_date: Option<DateTime<Utc>>,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            registration_date: model.registration_date,
            is_admin: model.is_admin,
            last_login_date: model.last_login_date,
        }
    }
}

impl From<entity::categories::Model> for Category {
    fn from(model: entity::categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            parent_category_id: model.parent_category_id,
        }
    }
}

impl From<entity::products::Model> for Product {
    fn from(model: entity::products::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock_quantity: model.stock_quantity,
            image_url: model.image_url,
            weight: model.weight,
            dimensions: model.dimensions,
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<entity::cart_items::Model> for CartItem {
    fn from(model: entity::cart_items::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            quantity: model.quantity,
            added_date: model.added_date,
        }
    }
}

impl From<entity::addresses::Model> for Address {
    fn from(model: entity::addresses::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            country: model.country,
            city: model.city,
            street: model.street,
            house_number: model.house_number,
            apartment: model.apartment,
            postal_code: model.postal_code,
            is_default: model.is_default,
        }
    }
}

impl From<entity::order_statuses::Model> for OrderStatus {
    fn from(model: entity::order_statuses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<entity::payment_methods::Model> for PaymentMethod {
    fn from(model: entity::payment_methods::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status_id: model.status_id,
            payment_method_id: model.payment_method_id,
            shipping_address_id: model.shipping_address_id,
            order_date: model.order_date,
            total_price: model.total_price,
            delivery_price: model.delivery_price,
            tracking_number: model.tracking_number,
            notes: model.notes,
        }
    }
}

impl From<entity::order_details::Model> for OrderDetail {
    fn from(model: entity::order_details::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            quantity: model.quantity,
            price_per_unit: model.price_per_unit,
        }
    }
}

impl From<entity::reviews::Model> for Review {
    fn from(model: entity::reviews::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            review_date: model.review_date,
        }
    }
}

impl From<entity::wishlist::Model> for WishlistItem {
    fn from(model: entity::wishlist::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            added_date: model.added_date,
        }
    }
}

impl From<entity::warehouses::Model> for Warehouse {
    fn from(model: entity::warehouses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            phone: model.phone,
            manager_name: model.manager_name,
        }
    }
}

impl From<entity::inventory::Model> for InventoryItem {
    fn from(model: entity::inventory::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            warehouse_id: model.warehouse_id,
            quantity: model.quantity,
            last_restock_date: model.last_restock_date,
        }
    }
}
