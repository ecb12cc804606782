pub mod addresses;
pub mod cart;
pub mod categories;
pub mod inventory;
pub mod lookups;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod users;
pub mod warehouses;
pub mod wishlist;
