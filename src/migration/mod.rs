use sea_orm_migration::prelude::*;

mod m20240101_000001_create_schema;
mod m20240513_000001_product_timestamp_trigger;

pub use m20240101_000001_create_schema::CANONICAL_STATUSES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_schema::Migration),
            Box::new(m20240513_000001_product_timestamp_trigger::Migration),
        ]
    }
}
