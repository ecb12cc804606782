use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        addresses::{CreateAddressRequest, UpdateAddressRequest},
        cart::{
            AddToCartRequest, CartLine, CartSummary, RemoveFromCartRequest, UpdateCartItemRequest,
            UpdateCartQuantityRequest,
        },
        categories::{CategoryWithProducts, CreateCategoryRequest, UpdateCategoryRequest},
        inventory::{
            CreateInventoryRequest, InventoryLine, UpdateInventoryRequest, UpdateStockRequest,
        },
        lookups::{CreateLookupRequest, UpdateLookupRequest},
        orders::{
            AddOrderDetailRequest, CreateOrderRequest, OrderDetailWithProduct, OrderLineRequest,
            OrderProductLine, OrderWithDetails, OrderWithProducts, UpdateOrderRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reports::{
            InventoryFilter, InventoryStat, PopularProduct, ProductAnalytics, SalesStatistic,
            TopSpender,
        },
        reviews::{
            CreateReviewRequest, ProductRating, RatingBucket, ReviewWithNames, UpdateReviewRequest,
        },
        users::{CreateUserRequest, UpdateUserRequest},
        warehouses::{CreateWarehouseRequest, UpdateWarehouseRequest},
        wishlist::{CreateWishlistRequest, UpdateWishlistRequest, WishlistCheck, WishlistEntry},
    },
    models::{
        Address, CartItem, Category, InventoryItem, Order, OrderDetail, OrderStatus,
        PaymentMethod, Product, Review, User, Warehouse, WishlistItem,
    },
    response::{Deleted, Meta},
    routes::{
        addresses, cart, categories, health, inventory, order_statuses, orders, params,
        payment_methods, products, reviews, users, warehouses, wishlist,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Electronics Store API", description = "Catalog, carts, orders and reports"),
    paths(
        health::health_check,
        health::db_health_check,
        users::list_users,
        users::top_spenders,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        categories::list_categories,
        categories::get_category,
        categories::category_products,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::available_products,
        products::products_by_category,
        products::popular_products,
        products::product_analytics,
        products::sales_statistics,
        products::inventory_stats,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        cart::list_cart_items,
        cart::get_cart_item,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::user_cart,
        cart::clear_user_cart,
        cart::carts_with_product,
        cart::cart_total,
        cart::cart_summary,
        cart::update_cart_item,
        cart::delete_cart_item,
        addresses::list_addresses,
        addresses::user_addresses,
        addresses::set_default_address,
        addresses::get_address,
        addresses::create_address,
        addresses::update_address,
        addresses::delete_address,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::add_order_detail,
        orders::user_orders,
        orders::update_order_status,
        orders::order_details,
        orders::update_order,
        orders::delete_order,
        order_statuses::list_statuses,
        order_statuses::get_status,
        order_statuses::orders_with_status,
        order_statuses::create_status,
        order_statuses::update_status,
        order_statuses::delete_status,
        payment_methods::list_payment_methods,
        payment_methods::get_payment_method,
        payment_methods::orders_with_payment_method,
        payment_methods::create_payment_method,
        payment_methods::update_payment_method,
        payment_methods::delete_payment_method,
        reviews::list_reviews,
        reviews::recent_reviews,
        reviews::product_reviews,
        reviews::product_rating,
        reviews::user_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        wishlist::list_wishlist,
        wishlist::user_wishlist,
        wishlist::clear_user_wishlist,
        wishlist::check_wishlist,
        wishlist::get_wishlist_item,
        wishlist::add_to_wishlist,
        wishlist::update_wishlist_item,
        wishlist::delete_wishlist_item,
        warehouses::list_warehouses,
        warehouses::get_warehouse,
        warehouses::warehouse_inventory,
        warehouses::warehouse_low_stock,
        warehouses::create_warehouse,
        warehouses::update_warehouse,
        warehouses::delete_warehouse,
        inventory::list_inventory,
        inventory::low_stock,
        inventory::product_inventory,
        inventory::inventory_by_warehouse,
        inventory::update_stock,
        inventory::get_inventory_item,
        inventory::create_inventory_item,
        inventory::update_inventory_item,
        inventory::delete_inventory_item
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            CartItem,
            Address,
            OrderStatus,
            PaymentMethod,
            Order,
            OrderDetail,
            Review,
            WishlistItem,
            Warehouse,
            InventoryItem,
            CreateUserRequest,
            UpdateUserRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryWithProducts,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            UpdateCartQuantityRequest,
            RemoveFromCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartSummary,
            CreateAddressRequest,
            UpdateAddressRequest,
            CreateLookupRequest,
            UpdateLookupRequest,
            OrderLineRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            AddOrderDetailRequest,
            OrderProductLine,
            OrderWithProducts,
            OrderDetailWithProduct,
            OrderWithDetails,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewWithNames,
            RatingBucket,
            ProductRating,
            CreateWishlistRequest,
            UpdateWishlistRequest,
            WishlistEntry,
            WishlistCheck,
            CreateWarehouseRequest,
            UpdateWarehouseRequest,
            CreateInventoryRequest,
            UpdateInventoryRequest,
            UpdateStockRequest,
            InventoryLine,
            TopSpender,
            ProductAnalytics,
            SalesStatistic,
            PopularProduct,
            InventoryStat,
            InventoryFilter,
            params::LimitQuery,
            params::TopSpendersQuery,
            params::SalesStatisticsQuery,
            params::ThresholdQuery,
            params::InventoryStatsQuery,
            health::HealthData,
            health::DbHealthData,
            Deleted,
            Meta
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database checks"),
        (name = "Users", description = "User accounts and spending report"),
        (name = "Categories", description = "Product categories"),
        (name = "Products", description = "Catalog and sales reports"),
        (name = "Cart", description = "Shopping carts"),
        (name = "Addresses", description = "Shipping addresses"),
        (name = "Orders", description = "Order placement and lifecycle"),
        (name = "Order statuses", description = "Order status lookup table"),
        (name = "Payment methods", description = "Payment method lookup table"),
        (name = "Reviews", description = "Product reviews and ratings"),
        (name = "Wishlist", description = "Saved products"),
        (name = "Warehouses", description = "Warehouses and their stock"),
        (name = "Inventory", description = "Stock per product and warehouse"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
