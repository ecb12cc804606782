use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    dto::cart::{
        AddToCartRequest, CartLine, CartSummary, RemoveFromCartRequest, UpdateCartItemRequest,
        UpdateCartQuantityRequest,
    },
    entity::{
        cart_items::{ActiveModel, Column, Entity as CartItems},
        products::Entity as Products,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::CartItem,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

fn ensure_positive(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_cart_items(state: &AppState) -> AppResult<ApiResponse<Vec<CartItem>>> {
    let items: Vec<CartItem> = CartItems::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CartItem::from)
        .collect();
    Ok(ApiResponse::list("Cart items", items))
}

pub async fn get_cart_item(state: &AppState, id: i32) -> AppResult<ApiResponse<CartItem>> {
    let item = crud::find_or_404::<CartItems, _>(&state.orm, "cart item", id).await?;
    Ok(ApiResponse::success("Cart item", item.into(), None))
}

/// Add `quantity` (default 1) of a product to a user's cart.
///
/// A single `INSERT .. ON CONFLICT DO UPDATE` either creates the line or
/// increments the existing one, so concurrent adds for the same pair always
/// end up in one row holding the sum.
pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = payload.quantity.unwrap_or(1);
    ensure_positive(quantity)?;
    crud::find_or_404::<Users, _>(&state.orm, "user", payload.user_id).await?;
    crud::find_or_404::<Products, _>(&state.orm, "product", payload.product_id).await?;

    let item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity, added_date)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + excluded.quantity
        RETURNING id, user_id, product_id, quantity, added_date
        "#,
    )
    .bind(payload.user_id)
    .bind(payload.product_id)
    .bind(quantity)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(
        user_id = item.user_id,
        product_id = item.product_id,
        added = quantity,
        quantity = item.quantity,
        "cart line upserted"
    );
    Ok(ApiResponse::success(
        "Added to cart",
        item,
        Some(Meta::empty()),
    ))
}

/// Overwrite the quantity of an existing cart line.
pub async fn update_quantity(
    state: &AppState,
    payload: UpdateCartQuantityRequest,
) -> AppResult<ApiResponse<CartItem>> {
    ensure_positive(payload.quantity)?;

    let item = sqlx::query_as::<_, CartItem>(
        r#"
        UPDATE cart_items
        SET quantity = ?3
        WHERE user_id = ?1 AND product_id = ?2
        RETURNING id, user_id, product_id, quantity, added_date
        "#,
    )
    .bind(payload.user_id)
    .bind(payload.product_id)
    .bind(payload.quantity)
    .fetch_optional(&state.pool)
    .await?;

    match item {
        Some(item) => Ok(ApiResponse::success(
            "Cart updated",
            item,
            Some(Meta::empty()),
        )),
        None => {
            tracing::warn!(
                user_id = payload.user_id,
                product_id = payload.product_id,
                "cart line not found"
            );
            Err(AppError::NotFound(format!(
                "cart item for user {} and product {}",
                payload.user_id, payload.product_id
            )))
        }
    }
}

/// Patch a cart line addressed by its id.
pub async fn update_cart_item(
    state: &AppState,
    id: i32,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let existing = crud::find_or_404::<CartItems, _>(&state.orm, "cart item", id).await?;
    let mut active: ActiveModel = existing.into();
    if let Some(quantity) = payload.quantity {
        ensure_positive(quantity)?;
        active.quantity = Set(quantity);
    }
    let item = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", item.into(), Some(Meta::empty())))
}

pub async fn remove_from_cart(
    state: &AppState,
    payload: RemoveFromCartRequest,
) -> AppResult<ApiResponse<Deleted>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?1 AND product_id = ?2")
        .bind(payload.user_id)
        .bind(payload.product_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(
        user_id = payload.user_id,
        product_id = payload.product_id,
        deleted = result.rows_affected(),
        "cart line removed"
    );
    Ok(ApiResponse::success(
        "Removed from cart",
        Deleted {
            deleted: result.rows_affected(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn clear_user_cart(state: &AppState, user_id: i32) -> AppResult<ApiResponse<Deleted>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
        .bind(user_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(user_id, deleted = result.rows_affected(), "cart cleared");
    Ok(ApiResponse::success(
        "Cart cleared",
        Deleted {
            deleted: result.rows_affected(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_cart_item(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<CartItems, _>(&state.orm, "cart item", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

/// The user's cart lines with product name, current price and line total.
pub async fn user_cart(state: &AppState, user_id: i32) -> AppResult<ApiResponse<Vec<CartLine>>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;
    let lines = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.id, ci.user_id, ci.product_id, ci.quantity, ci.added_date,
               p.name AS product_name, p.price, ci.quantity * p.price AS line_total
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.user_id = ?1
        ORDER BY ci.added_date DESC, ci.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::list("Cart", lines))
}

/// Every cart line holding the given product.
pub async fn carts_with_product(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<Vec<CartItem>>> {
    crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;
    let items = sqlx::query_as::<_, CartItem>(
        r#"
        SELECT id, user_id, product_id, quantity, added_date
        FROM cart_items
        WHERE product_id = ?1
        ORDER BY id
        "#,
    )
    .bind(product_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::list("Carts with product", items))
}

/// Cart total, line count and unit count for a user, aggregated in SQL.
pub async fn cart_summary(state: &AppState, user_id: i32) -> AppResult<ApiResponse<CartSummary>> {
    let summary = sqlx::query_as::<_, CartSummary>(
        r#"
        SELECT u.id AS user_id,
               u.email AS email,
               COALESCE(SUM(ci.quantity * p.price), 0) AS cart_total,
               COUNT(ci.id) AS items_count,
               COALESCE(SUM(ci.quantity), 0) AS total_quantity
        FROM users u
        LEFT JOIN cart_items ci ON ci.user_id = u.id
        LEFT JOIN products p ON p.id = ci.product_id
        WHERE u.id = ?1
        GROUP BY u.id, u.email
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?;

    match summary {
        Some(summary) => {
            tracing::debug!(user_id, total = summary.cart_total, "cart summary");
            Ok(ApiResponse::success("Cart summary", summary, None))
        }
        None => {
            tracing::warn!(user_id, "cart summary for unknown user");
            Err(AppError::not_found("user", user_id))
        }
    }
}
