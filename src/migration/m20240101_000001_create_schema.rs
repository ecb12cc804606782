use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Status rows every deployment starts with; reports resolve them by name.
pub const CANONICAL_STATUSES: [(&str, &str); 5] = [
    ("Pending", "Order received, awaiting processing"),
    ("Processing", "Order is being assembled"),
    ("Shipped", "Order handed to the carrier"),
    ("Delivered", "Order received by the customer"),
    ("Cancelled", "Order cancelled"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .col(string_null(Users::Phone))
                    .col(timestamp_with_time_zone(Users::RegistrationDate))
                    .col(boolean(Users::IsAdmin).default(false))
                    .col(timestamp_with_time_zone_null(Users::LastLoginDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(text_null(Categories::Description))
                    .col(integer_null(Categories::ParentCategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent")
                            .from(Categories::Table, Categories::ParentCategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(integer(Products::CategoryId))
                    .col(string(Products::Name))
                    .col(text_null(Products::Description))
                    .col(big_integer(Products::Price).check(Expr::col(Products::Price).gte(0)))
                    .col(
                        integer(Products::StockQuantity)
                            .default(0)
                            .check(Expr::col(Products::StockQuantity).gte(0)),
                    )
                    .col(string_null(Products::ImageUrl))
                    .col(double_null(Products::Weight))
                    .col(string_null(Products::Dimensions))
                    .col(boolean(Products::IsAvailable).default(true))
                    .col(timestamp_with_time_zone(Products::CreatedAt))
                    .col(timestamp_with_time_zone(Products::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(pk_auto(CartItems::Id))
                    .col(integer(CartItems::UserId))
                    .col(integer(CartItems::ProductId))
                    .col(integer(CartItems::Quantity).check(Expr::col(CartItems::Quantity).gte(1)))
                    .col(timestamp_with_time_zone(CartItems::AddedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_user")
                            .from(CartItems::Table, CartItems::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_product")
                            .from(CartItems::Table, CartItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(integer(Addresses::UserId))
                    .col(string(Addresses::Country))
                    .col(string(Addresses::City))
                    .col(string(Addresses::Street))
                    .col(string(Addresses::HouseNumber))
                    .col(string_null(Addresses::Apartment))
                    .col(string(Addresses::PostalCode))
                    .col(boolean(Addresses::IsDefault).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderStatuses::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderStatuses::Id))
                    .col(string(OrderStatuses::Name).unique_key())
                    .col(text_null(OrderStatuses::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentMethods::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentMethods::Id))
                    .col(string(PaymentMethods::Name).unique_key())
                    .col(text_null(PaymentMethods::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(integer(Orders::UserId))
                    .col(integer(Orders::StatusId))
                    .col(integer(Orders::PaymentMethodId))
                    .col(integer(Orders::ShippingAddressId))
                    .col(timestamp_with_time_zone(Orders::OrderDate))
                    .col(
                        big_integer(Orders::TotalPrice)
                            .check(Expr::col(Orders::TotalPrice).gte(0)),
                    )
                    .col(
                        big_integer(Orders::DeliveryPrice)
                            .check(Expr::col(Orders::DeliveryPrice).gte(0)),
                    )
                    .col(string_null(Orders::TrackingNumber))
                    .col(text_null(Orders::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_status")
                            .from(Orders::Table, Orders::StatusId)
                            .to(OrderStatuses::Table, OrderStatuses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_payment_method")
                            .from(Orders::Table, Orders::PaymentMethodId)
                            .to(PaymentMethods::Table, PaymentMethods::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_shipping_address")
                            .from(Orders::Table, Orders::ShippingAddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderDetails::Id))
                    .col(integer(OrderDetails::OrderId))
                    .col(integer(OrderDetails::ProductId))
                    .col(
                        integer(OrderDetails::Quantity)
                            .check(Expr::col(OrderDetails::Quantity).gte(1)),
                    )
                    .col(
                        big_integer(OrderDetails::PricePerUnit)
                            .check(Expr::col(OrderDetails::PricePerUnit).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_order")
                            .from(OrderDetails::Table, OrderDetails::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_product")
                            .from(OrderDetails::Table, OrderDetails::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_auto(Reviews::Id))
                    .col(integer(Reviews::ProductId))
                    .col(integer(Reviews::UserId))
                    .col(
                        integer(Reviews::Rating)
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(text_null(Reviews::Comment))
                    .col(timestamp_with_time_zone(Reviews::ReviewDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_product")
                            .from(Reviews::Table, Reviews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Wishlist::Table)
                    .if_not_exists()
                    .col(pk_auto(Wishlist::Id))
                    .col(integer(Wishlist::UserId))
                    .col(integer(Wishlist::ProductId))
                    .col(timestamp_with_time_zone(Wishlist::AddedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_user")
                            .from(Wishlist::Table, Wishlist::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_product")
                            .from(Wishlist::Table, Wishlist::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Warehouses::Table)
                    .if_not_exists()
                    .col(pk_auto(Warehouses::Id))
                    .col(string(Warehouses::Name).unique_key())
                    .col(string(Warehouses::Address))
                    .col(string(Warehouses::Phone))
                    .col(string(Warehouses::ManagerName))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventory::Id))
                    .col(integer(Inventory::ProductId))
                    .col(integer(Inventory::WarehouseId))
                    .col(integer(Inventory::Quantity).check(Expr::col(Inventory::Quantity).gte(0)))
                    .col(timestamp_with_time_zone_null(Inventory::LastRestockDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_product")
                            .from(Inventory::Table, Inventory::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_warehouse")
                            .from(Inventory::Table, Inventory::WarehouseId)
                            .to(Warehouses::Table, Warehouses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        create_indexes(manager).await?;
        seed_statuses(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Inventory::Table.into_iden(),
            Warehouses::Table.into_iden(),
            Wishlist::Table.into_iden(),
            Reviews::Table.into_iden(),
            OrderDetails::Table.into_iden(),
            Orders::Table.into_iden(),
            PaymentMethods::Table.into_iden(),
            OrderStatuses::Table.into_iden(),
            Addresses::Table.into_iden(),
            CartItems::Table.into_iden(),
            Products::Table.into_iden(),
            Categories::Table.into_iden(),
            Users::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let plain = [
        ("idx_addresses_user", Addresses::Table.into_iden(), vec![Addresses::UserId.into_iden()]),
        (
            "idx_inventory_product",
            Inventory::Table.into_iden(),
            vec![Inventory::ProductId.into_iden()],
        ),
        (
            "idx_inventory_warehouse",
            Inventory::Table.into_iden(),
            vec![Inventory::WarehouseId.into_iden()],
        ),
        (
            "idx_order_details_order",
            OrderDetails::Table.into_iden(),
            vec![OrderDetails::OrderId.into_iden()],
        ),
        (
            "idx_order_details_product",
            OrderDetails::Table.into_iden(),
            vec![OrderDetails::ProductId.into_iden()],
        ),
        (
            "idx_order_details_order_product_qty",
            OrderDetails::Table.into_iden(),
            vec![
                OrderDetails::OrderId.into_iden(),
                OrderDetails::ProductId.into_iden(),
                OrderDetails::Quantity.into_iden(),
            ],
        ),
        ("idx_orders_user", Orders::Table.into_iden(), vec![Orders::UserId.into_iden()]),
        ("idx_orders_status", Orders::Table.into_iden(), vec![Orders::StatusId.into_iden()]),
        ("idx_orders_date", Orders::Table.into_iden(), vec![Orders::OrderDate.into_iden()]),
        ("idx_reviews_product", Reviews::Table.into_iden(), vec![Reviews::ProductId.into_iden()]),
        (
            "idx_reviews_user_product",
            Reviews::Table.into_iden(),
            vec![Reviews::UserId.into_iden(), Reviews::ProductId.into_iden()],
        ),
    ];

    for (name, table, columns) in plain {
        let mut index = Index::create();
        index.name(name).table(table).if_not_exists();
        for column in columns {
            index.col(column);
        }
        manager.create_index(index.to_owned()).await?;
    }

    // One cart line per (user, product): the upsert in the cart service relies on it.
    manager
        .create_index(
            Index::create()
                .name("idx_cart_items_user_product")
                .table(CartItems::Table)
                .col(CartItems::UserId)
                .col(CartItems::ProductId)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await?;

    // At most one default address per user.
    manager
        .get_connection()
        .execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_addresses_single_default \
             ON addresses (user_id) WHERE is_default = 1",
        )
        .await?;

    Ok(())
}

async fn seed_statuses(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = db.get_database_backend();
    for (name, description) in CANONICAL_STATUSES {
        let insert = Query::insert()
            .into_table(OrderStatuses::Table)
            .columns([OrderStatuses::Name, OrderStatuses::Description])
            .values_panic([name.into(), description.into()])
            .on_conflict(OnConflict::column(OrderStatuses::Name).do_nothing().to_owned())
            .to_owned();
        db.execute(backend.build(&insert)).await?;
    }
    Ok(())
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    RegistrationDate,
    IsAdmin,
    LastLoginDate,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    ParentCategoryId,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    CategoryId,
    Name,
    Description,
    Price,
    StockQuantity,
    ImageUrl,
    Weight,
    Dimensions,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    UserId,
    ProductId,
    Quantity,
    AddedDate,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    Country,
    City,
    Street,
    HouseNumber,
    Apartment,
    PostalCode,
    IsDefault,
}

#[derive(DeriveIden)]
enum OrderStatuses {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum PaymentMethods {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    StatusId,
    PaymentMethodId,
    ShippingAddressId,
    OrderDate,
    TotalPrice,
    DeliveryPrice,
    TrackingNumber,
    Notes,
}

#[derive(DeriveIden)]
enum OrderDetails {
    Table,
    Id,
    OrderId,
    ProductId,
    Quantity,
    PricePerUnit,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ProductId,
    UserId,
    Rating,
    Comment,
    ReviewDate,
}

#[derive(DeriveIden)]
enum Wishlist {
    Table,
    Id,
    UserId,
    ProductId,
    AddedDate,
}

#[derive(DeriveIden)]
enum Warehouses {
    Table,
    Id,
    Name,
    Address,
    Phone,
    ManagerName,
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    ProductId,
    WarehouseId,
    Quantity,
    LastRestockDate,
}
