mod common;

use chrono::{TimeZone, Utc};
use electronics_store_api::{
    dto::{
        categories::UpdateCategoryRequest, products::UpdateProductRequest,
        reviews::CreateReviewRequest, users::UpdateUserRequest, wishlist::CreateWishlistRequest,
    },
    error::AppError,
    services::{
        category_service, product_service, review_service, user_service, wishlist_service,
    },
};

use common::{create_category, create_product, create_user, data, setup_state};

#[tokio::test]
async fn product_create_get_update_delete() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let category = create_category(&state, "Laptops").await?;
    let id = create_product(&state, category, "Ultrabook", 129_900).await?;

    let created = data(product_service::get_product(&state, id).await?)?;
    assert_eq!(created.name, "Ultrabook");
    assert_eq!(created.price, 129_900);
    assert!(created.is_available);

    let updated = data(
        product_service::update_product(
            &state,
            id,
            UpdateProductRequest {
                price: Some(119_900),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await?,
    )?;
    assert_eq!(updated.price, 119_900);
    assert!(!updated.is_available);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(data(product_service::get_product(&state, id).await?)?, updated);

    let available = data(product_service::list_available(&state).await?)?;
    assert!(available.items.is_empty());

    let deleted = data(product_service::delete_product(&state, id).await?)?;
    assert_eq!(deleted.deleted, 1);
    let err = product_service::get_product(&state, id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let again = data(product_service::delete_product(&state, id).await?)?;
    assert_eq!(again.deleted, 0);
    Ok(())
}

#[tokio::test]
async fn product_update_refreshes_timestamp_through_trigger() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let category = create_category(&state, "Tablets").await?;
    let id = create_product(&state, category, "Slate", 49_900).await?;

    let stale = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    sqlx::query("UPDATE products SET updated_at = ?1 WHERE id = ?2")
        .bind(stale)
        .bind(id)
        .execute(&state.pool)
        .await?;
    let before = data(product_service::get_product(&state, id).await?)?;
    assert_eq!(before.updated_at, stale);

    let updated = data(
        product_service::update_product(
            &state,
            id,
            UpdateProductRequest {
                name: Some("Slate Pro".to_string()),
                ..Default::default()
            },
        )
        .await?,
    )?;
    assert_eq!(updated.name, "Slate Pro");
    assert!(updated.updated_at > stale);
    assert!(updated.updated_at >= before.created_at);

    let untouched = data(
        product_service::update_product(&state, id, UpdateProductRequest::default()).await?,
    )?;
    assert_eq!(untouched, updated);
    Ok(())
}

#[tokio::test]
async fn invalid_product_input_is_rejected() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let category = create_category(&state, "Audio").await?;
    let id = create_product(&state, category, "Speaker", 7_900).await?;

    let err = product_service::update_product(
        &state,
        id,
        UpdateProductRequest {
            price: Some(-1),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = create_product(&state, 999, "Orphan", 100).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn categories_nest_and_protect_their_products() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let root = create_category(&state, "Computers").await?;
    let child = create_category(&state, "Laptops").await?;
    create_product(&state, child, "Ultrabook", 129_900).await?;

    let moved = data(
        category_service::update_category(
            &state,
            child,
            UpdateCategoryRequest {
                parent_category_id: Some(root),
                ..Default::default()
            },
        )
        .await?,
    )?;
    assert_eq!(moved.parent_category_id, Some(root));

    let err = category_service::update_category(
        &state,
        root,
        UpdateCategoryRequest {
            parent_category_id: Some(root),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let with_products = data(category_service::category_with_products(&state, child).await?)?;
    assert_eq!(with_products.category.id, child);
    assert_eq!(with_products.products.len(), 1);

    let err = category_service::delete_category(&state, child).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Removing the parent detaches the child instead of deleting it.
    category_service::delete_category(&state, root).await?;
    let orphan = data(category_service::get_category(&state, child).await?)?;
    assert_eq!(orphan.parent_category_id, None);
    Ok(())
}

#[tokio::test]
async fn users_hide_hashes_and_reject_duplicate_emails() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let id = create_user(&state, "Someone@Example.com").await?;

    let user = data(user_service::get_user(&state, id).await?)?;
    assert_eq!(user.email, "someone@example.com");
    let json = serde_json::to_value(&user)?;
    assert!(json.get("password_hash").is_none());

    let err = create_user(&state, "someone@example.com").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Conflict(_))
    ));

    let renamed = data(
        user_service::update_user(
            &state,
            id,
            UpdateUserRequest {
                first_name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await?,
    )?;
    assert_eq!(renamed.first_name, "Renamed");
    assert_eq!(renamed.registration_date, user.registration_date);
    Ok(())
}

#[tokio::test]
async fn reviews_and_wishlist_follow_their_owners() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let user = create_user(&state, "fan@example.com").await?;
    let category = create_category(&state, "Audio").await?;
    let product = create_product(&state, category, "Speaker", 7_900).await?;

    let err = review_service::create_review(
        &state,
        CreateReviewRequest {
            product_id: product,
            user_id: user,
            rating: 6,
            comment: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    for rating in [5, 3, 5] {
        review_service::create_review(
            &state,
            CreateReviewRequest {
                product_id: product,
                user_id: user,
                rating,
                comment: Some("solid".to_string()),
            },
        )
        .await?;
    }
    let rating = data(review_service::product_rating(&state, product).await?)?;
    assert_eq!(rating.review_count, 3);
    assert!((rating.average_rating - 13.0 / 3.0).abs() < 1e-9);
    let fives = rating.distribution.iter().find(|b| b.rating == 5).map(|b| b.count);
    assert_eq!(fives, Some(2));

    let reviews = data(review_service::user_reviews(&state, user).await?)?;
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0].product_name, "Speaker");

    wishlist_service::add_to_wishlist(
        &state,
        CreateWishlistRequest {
            user_id: user,
            product_id: product,
        },
    )
    .await?;
    let check = data(wishlist_service::is_in_wishlist(&state, user, product).await?)?;
    assert!(check.in_wishlist);

    // Deleting the product cascades to reviews and wishlist rows.
    product_service::delete_product(&state, product).await?;
    let check = data(wishlist_service::is_in_wishlist(&state, user, product).await?)?;
    assert!(!check.in_wishlist);
    let reviews = data(review_service::user_reviews(&state, user).await?)?;
    assert!(reviews.is_empty());
    Ok(())
}
