#![allow(dead_code)]

use electronics_store_api::{
    db::{create_pool, run_migrations},
    dto::{
        addresses::CreateAddressRequest, categories::CreateCategoryRequest,
        lookups::CreateLookupRequest,
        orders::{CreateOrderRequest, OrderLineRequest, OrderWithDetails},
        products::CreateProductRequest,
        users::CreateUserRequest,
    },
    response::ApiResponse,
    services::{
        address_service, category_service, lookup_service, order_service, product_service,
        user_service,
    },
    state::AppState,
};
use tempfile::TempDir;

/// Fresh migrated SQLite file per test. Keep the `TempDir` alive for the test's duration.
pub async fn setup_state() -> anyhow::Result<(AppState, TempDir)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}", dir.path().join("store.sqlite").display());
    let pool = create_pool(&url, 5).await?;
    let state = AppState::with_defaults(pool);
    run_migrations(&state.orm).await?;
    Ok((state, dir))
}

pub fn data<T>(resp: ApiResponse<T>) -> anyhow::Result<T> {
    resp.data
        .ok_or_else(|| anyhow::anyhow!("response carried no data"))
}

pub async fn create_user(state: &AppState, email: &str) -> anyhow::Result<i32> {
    let user = data(
        user_service::create_user(
            state,
            CreateUserRequest {
                email: email.to_string(),
                password: "secret123".to_string(),
                first_name: "Test".to_string(),
                last_name: email.split('@').next().unwrap_or("user").to_string(),
                phone: None,
                is_admin: false,
            },
        )
        .await?,
    )?;
    Ok(user.id)
}

pub async fn create_category(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let category = data(
        category_service::create_category(
            state,
            CreateCategoryRequest {
                name: name.to_string(),
                description: None,
                parent_category_id: None,
            },
        )
        .await?,
    )?;
    Ok(category.id)
}

pub async fn create_product(
    state: &AppState,
    category_id: i32,
    name: &str,
    price: i64,
) -> anyhow::Result<i32> {
    let product = data(
        product_service::create_product(
            state,
            CreateProductRequest {
                category_id,
                name: name.to_string(),
                description: None,
                price,
                stock_quantity: 10,
                image_url: None,
                weight: None,
                dimensions: None,
                is_available: true,
            },
        )
        .await?,
    )?;
    Ok(product.id)
}

pub async fn create_address(
    state: &AppState,
    user_id: i32,
    is_default: bool,
) -> anyhow::Result<i32> {
    let address = data(
        address_service::create_address(
            state,
            CreateAddressRequest {
                user_id,
                country: "Norway".to_string(),
                city: "Oslo".to_string(),
                street: "Karl Johans gate".to_string(),
                house_number: "1".to_string(),
                apartment: None,
                postal_code: "0154".to_string(),
                is_default,
            },
        )
        .await?,
    )?;
    Ok(address.id)
}

pub async fn create_payment_method(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let method = data(
        lookup_service::create_payment_method(
            state,
            CreateLookupRequest {
                name: name.to_string(),
                description: None,
            },
        )
        .await?,
    )?;
    Ok(method.id)
}

/// Ids a test needs to place orders for one user.
pub struct Shopper {
    pub user_id: i32,
    pub address_id: i32,
    pub payment_method_id: i32,
}

pub async fn shopper(
    state: &AppState,
    email: &str,
    payment_method_id: i32,
) -> anyhow::Result<Shopper> {
    let user_id = create_user(state, email).await?;
    let address_id = create_address(state, user_id, true).await?;
    Ok(Shopper {
        user_id,
        address_id,
        payment_method_id,
    })
}

/// Place an order of `(product_id, quantity, price_per_unit)` lines.
pub async fn place_order(
    state: &AppState,
    shopper: &Shopper,
    lines: &[(i32, i32, i64)],
    status_id: Option<i32>,
) -> anyhow::Result<OrderWithDetails> {
    let items = lines
        .iter()
        .map(|&(product_id, quantity, price)| OrderLineRequest {
            product_id,
            quantity,
            price_per_unit: Some(price),
        })
        .collect();
    data(
        order_service::create_order(
            state,
            CreateOrderRequest {
                user_id: shopper.user_id,
                payment_method_id: shopper.payment_method_id,
                shipping_address_id: shopper.address_id,
                status_id,
                delivery_price: 0,
                tracking_number: None,
                notes: None,
                total_price: None,
                items,
            },
        )
        .await?,
    )
}
