use anyhow::Context;
use electronics_store_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        categories::CreateCategoryRequest, inventory::CreateInventoryRequest,
        lookups::CreateLookupRequest, products::CreateProductRequest, users::CreateUserRequest,
        warehouses::CreateWarehouseRequest,
    },
    response::ApiResponse,
    services::{
        category_service, inventory_service, lookup_service, product_service, user_service,
        warehouse_service,
    },
    state::AppState,
};

/// (category, name, price in cents, stock)
const PRODUCTS: [(&str, &str, i64, i32); 6] = [
    ("Laptops", "Ultrabook 14", 129_900, 12),
    ("Laptops", "Gaming Laptop 16", 219_900, 5),
    ("Smartphones", "Phone X", 89_900, 40),
    ("Smartphones", "Phone Mini", 59_900, 25),
    ("Audio", "Noise Cancelling Headphones", 29_900, 60),
    ("Audio", "Bluetooth Speaker", 7_900, 0),
];

const CATEGORIES: [(&str, &str); 3] = [
    ("Laptops", "Portable computers"),
    ("Smartphones", "Mobile phones"),
    ("Audio", "Headphones and speakers"),
];

const PAYMENT_METHODS: [(&str, &str); 3] = [
    ("Card", "Credit or debit card"),
    ("Cash on delivery", "Paid to the courier"),
    ("Bank transfer", "Prepaid wire transfer"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(pool.clone(), &config);
    run_migrations(&state.orm).await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        println!("Catalog already holds {existing} products, skipping seed");
        return Ok(());
    }

    let mut category_ids = Vec::new();
    for (name, description) in CATEGORIES {
        let category = data(
            category_service::create_category(
                &state,
                CreateCategoryRequest {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    parent_category_id: None,
                },
            )
            .await?,
        )?;
        category_ids.push((name, category.id));
    }

    for (name, description) in PAYMENT_METHODS {
        lookup_service::create_payment_method(
            &state,
            CreateLookupRequest {
                name: name.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await?;
    }

    let main_warehouse = data(
        warehouse_service::create_warehouse(
            &state,
            CreateWarehouseRequest {
                name: "Central".to_string(),
                address: "1 Depot Road".to_string(),
                phone: "+10000000001".to_string(),
                manager_name: "Alex Morgan".to_string(),
            },
        )
        .await?,
    )?;
    let outlet = data(
        warehouse_service::create_warehouse(
            &state,
            CreateWarehouseRequest {
                name: "Outlet".to_string(),
                address: "22 Market Street".to_string(),
                phone: "+10000000002".to_string(),
                manager_name: "Sam Lee".to_string(),
            },
        )
        .await?,
    )?;

    for (category, name, price, stock) in PRODUCTS {
        let category_id = category_ids
            .iter()
            .find(|(n, _)| *n == category)
            .map(|(_, id)| *id)
            .with_context(|| format!("unknown seed category {category}"))?;
        let product = data(
            product_service::create_product(
                &state,
                CreateProductRequest {
                    category_id,
                    name: name.to_string(),
                    description: None,
                    price,
                    stock_quantity: stock,
                    image_url: None,
                    weight: None,
                    dimensions: None,
                    is_available: true,
                },
            )
            .await?,
        )?;

        // Split stock between the two warehouses; the outlet takes the smaller share.
        let outlet_share = stock / 4;
        for (warehouse_id, quantity) in [
            (main_warehouse.id, stock - outlet_share),
            (outlet.id, outlet_share),
        ] {
            inventory_service::create_inventory_item(
                &state,
                CreateInventoryRequest {
                    product_id: product.id,
                    warehouse_id,
                    quantity,
                    last_restock_date: None,
                },
            )
            .await?;
        }
    }

    let user = data(
        user_service::create_user(
            &state,
            CreateUserRequest {
                email: "demo@example.com".to_string(),
                password: "demo12345".to_string(),
                first_name: "Demo".to_string(),
                last_name: "Customer".to_string(),
                phone: None,
                is_admin: false,
            },
        )
        .await?,
    )?;

    pool.close().await;
    println!(
        "Seed completed: {} categories, {} products, demo user {}",
        CATEGORIES.len(),
        PRODUCTS.len(),
        user.id
    );
    Ok(())
}

fn data<T>(resp: ApiResponse<T>) -> anyhow::Result<T> {
    resp.data.context("service returned no data")
}
