pub mod address_service;
pub mod cart_service;
pub mod category_service;
pub mod crud;
pub mod inventory_service;
pub mod lookup_service;
pub mod order_service;
pub mod product_service;
pub mod report_service;
pub mod review_service;
pub mod status_rules;
pub mod user_service;
pub mod warehouse_service;
pub mod wishlist_service;
