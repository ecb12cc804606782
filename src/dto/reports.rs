use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Money fields are in cents.
#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct TopSpender {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub total_spent: i64,
    pub order_count: i64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct ProductAnalytics {
    pub product_id: i32,
    pub name: String,
    pub total_orders: i64,
    pub total_sold: i64,
    pub total_revenue: i64,
    pub avg_order_quantity: f64,
    pub total_reviews: i64,
    pub avg_rating: f64,
    pub current_stock: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct SalesStatistic {
    pub product_id: i32,
    pub name: String,
    pub total_sold: i64,
    pub total_revenue: i64,
    pub total_stock: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct PopularProduct {
    pub product_id: i32,
    pub name: String,
    pub total_sold: i64,
    pub total_revenue: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct InventoryStat {
    pub product_id: i32,
    pub name: String,
    pub price: i64,
    pub total_quantity: i64,
    /// `"Warehouse (qty), ..."` for every warehouse stocking the product.
    pub warehouses: String,
}

/// Row filter for the inventory stats report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InventoryFilter {
    /// Keep products with more than 30 units in total, or none at all.
    #[default]
    Legacy,
    All,
}

impl InventoryFilter {
    pub fn keeps(self, total_quantity: i64) -> bool {
        match self {
            InventoryFilter::Legacy => total_quantity > 30 || total_quantity == 0,
            InventoryFilter::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_filter_drops_the_one_to_thirty_band() {
        let filter = InventoryFilter::Legacy;
        assert!(filter.keeps(0));
        assert!(!filter.keeps(1));
        assert!(!filter.keeps(30));
        assert!(filter.keeps(31));
    }

    #[test]
    fn all_filter_keeps_everything() {
        assert!((0..40).all(|q| InventoryFilter::All.keeps(q)));
    }
}
