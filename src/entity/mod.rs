pub mod addresses;
pub mod cart_items;
pub mod categories;
pub mod inventory;
pub mod order_details;
pub mod order_statuses;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod reviews;
pub mod users;
pub mod warehouses;
pub mod wishlist;

pub use addresses::Entity as Addresses;
pub use cart_items::Entity as CartItems;
pub use categories::Entity as Categories;
pub use inventory::Entity as Inventory;
pub use order_details::Entity as OrderDetails;
pub use order_statuses::Entity as OrderStatuses;
pub use orders::Entity as Orders;
pub use payment_methods::Entity as PaymentMethods;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
pub use warehouses::Entity as Warehouses;
pub use wishlist::Entity as Wishlist;
