mod common;

use std::collections::HashMap;

use electronics_store_api::{
    dto::cart::{AddToCartRequest, RemoveFromCartRequest, UpdateCartQuantityRequest},
    error::AppError,
    services::cart_service,
};
use proptest::prelude::*;

use common::{create_category, create_product, create_user, data, setup_state};

fn add(user_id: i32, product_id: i32, quantity: Option<i32>) -> AddToCartRequest {
    AddToCartRequest {
        user_id,
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn adding_twice_sums_into_one_line() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "cart@example.com").await?;
    let category = create_category(&state, "Phones").await?;
    let product = create_product(&state, category, "Phone X", 89_900).await?;

    let first = data(cart_service::add_to_cart(&state, add(user, product, Some(2))).await?)?;
    let second = data(cart_service::add_to_cart(&state, add(user, product, Some(3))).await?)?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);

    let lines = data(cart_service::user_cart(&state, user).await?)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line_total, 5 * 89_900);
    Ok(())
}

#[tokio::test]
async fn quantity_defaults_to_one_and_rejects_non_positive() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "default@example.com").await?;
    let category = create_category(&state, "Audio").await?;
    let product = create_product(&state, category, "Earbuds", 4_900).await?;

    let item = data(cart_service::add_to_cart(&state, add(user, product, None)).await?)?;
    assert_eq!(item.quantity, 1);

    let err = cart_service::add_to_cart(&state, add(user, product, Some(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn unknown_user_or_product_is_not_found() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "known@example.com").await?;
    let category = create_category(&state, "Audio").await?;
    let product = create_product(&state, category, "Earbuds", 4_900).await?;

    let err = cart_service::add_to_cart(&state, add(999, product, Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = cart_service::add_to_cart(&state, add(user, 999, Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = cart_service::cart_summary(&state, 999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn concurrent_adds_land_in_a_single_row() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "race@example.com").await?;
    let category = create_category(&state, "Laptops").await?;
    let product = create_product(&state, category, "Ultrabook", 129_900).await?;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            cart_service::add_to_cart(&state, add(user, product, Some(2))).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let lines = data(cart_service::user_cart(&state, user).await?)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 16);
    Ok(())
}

#[tokio::test]
async fn summary_of_empty_cart_is_all_zero() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "empty@example.com").await?;

    let summary = data(cart_service::cart_summary(&state, user).await?)?;
    assert_eq!(summary.user_id, user);
    assert_eq!(summary.email, "empty@example.com");
    assert_eq!(
        (summary.cart_total, summary.items_count, summary.total_quantity),
        (0, 0, 0)
    );
    Ok(())
}

#[tokio::test]
async fn update_remove_and_clear() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "edit@example.com").await?;
    let category = create_category(&state, "Audio").await?;
    let speaker = create_product(&state, category, "Speaker", 7_900).await?;
    let headphones = create_product(&state, category, "Headphones", 29_900).await?;

    cart_service::add_to_cart(&state, add(user, speaker, Some(3))).await?;
    cart_service::add_to_cart(&state, add(user, headphones, Some(1))).await?;

    let updated = data(
        cart_service::update_quantity(
            &state,
            UpdateCartQuantityRequest {
                user_id: user,
                product_id: speaker,
                quantity: 1,
            },
        )
        .await?,
    )?;
    assert_eq!(updated.quantity, 1);

    let summary = data(cart_service::cart_summary(&state, user).await?)?;
    assert_eq!(summary.cart_total, 7_900 + 29_900);
    assert_eq!(summary.items_count, 2);

    let removed = data(
        cart_service::remove_from_cart(
            &state,
            RemoveFromCartRequest {
                user_id: user,
                product_id: speaker,
            },
        )
        .await?,
    )?;
    assert_eq!(removed.deleted, 1);

    let err = cart_service::update_quantity(
        &state,
        UpdateCartQuantityRequest {
            user_id: user,
            product_id: speaker,
            quantity: 2,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let cleared = data(cart_service::clear_user_cart(&state, user).await?)?;
    assert_eq!(cleared.deleted, 1);
    let lines = data(cart_service::user_cart(&state, user).await?)?;
    assert!(lines.is_empty());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn summary_matches_sequence_of_adds(
        adds in prop::collection::vec((0usize..3, 1i32..6), 0..10)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (state, _dir) = setup_state().await.unwrap();
            let user = create_user(&state, "prop@example.com").await.unwrap();
            let category = create_category(&state, "Mixed").await.unwrap();
            let prices = [1_999_i64, 5_000, 129_900];
            let mut products = Vec::new();
            for (i, price) in prices.iter().enumerate() {
                products.push(
                    create_product(&state, category, &format!("Item {i}"), *price)
                        .await
                        .unwrap(),
                );
            }

            let mut expected: HashMap<usize, i64> = HashMap::new();
            for &(index, quantity) in &adds {
                cart_service::add_to_cart(&state, add(user, products[index], Some(quantity)))
                    .await
                    .unwrap();
                *expected.entry(index).or_default() += i64::from(quantity);
            }

            let summary = data(cart_service::cart_summary(&state, user).await.unwrap()).unwrap();
            let total: i64 = expected.iter().map(|(i, q)| q * prices[*i]).sum();
            let units: i64 = expected.values().sum();
            assert_eq!(summary.cart_total, total);
            assert_eq!(summary.total_quantity, units);
            assert_eq!(summary.items_count, expected.len() as i64);
        });
    }
}
