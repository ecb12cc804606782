use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::wishlist::{CreateWishlistRequest, UpdateWishlistRequest, WishlistCheck, WishlistEntry},
    entity::{
        products::Entity as Products,
        users::Entity as Users,
        wishlist::{ActiveModel, Column, Entity as Wishlist},
    },
    error::AppResult,
    models::WishlistItem,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

pub async fn list_wishlist(state: &AppState) -> AppResult<ApiResponse<Vec<WishlistItem>>> {
    let items: Vec<WishlistItem> = Wishlist::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(WishlistItem::from)
        .collect();
    Ok(ApiResponse::list("Wishlist", items))
}

pub async fn get_wishlist_item(state: &AppState, id: i32) -> AppResult<ApiResponse<WishlistItem>> {
    let item = crud::find_or_404::<Wishlist, _>(&state.orm, "wishlist item", id).await?;
    Ok(ApiResponse::success("Wishlist item", item.into(), None))
}

pub async fn add_to_wishlist(
    state: &AppState,
    payload: CreateWishlistRequest,
) -> AppResult<ApiResponse<WishlistItem>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", payload.user_id).await?;
    crud::find_or_404::<Products, _>(&state.orm, "product", payload.product_id).await?;

    let item = ActiveModel {
        id: NotSet,
        user_id: Set(payload.user_id),
        product_id: Set(payload.product_id),
        added_date: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = item.user_id, product_id = item.product_id, "wishlist add");
    Ok(ApiResponse::success(
        "Added to wishlist",
        item.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_wishlist_item(
    state: &AppState,
    id: i32,
    payload: UpdateWishlistRequest,
) -> AppResult<ApiResponse<WishlistItem>> {
    let existing = crud::find_or_404::<Wishlist, _>(&state.orm, "wishlist item", id).await?;
    let mut active: ActiveModel = existing.into();
    if let Some(user_id) = payload.user_id {
        crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;
        active.user_id = Set(user_id);
    }
    if let Some(product_id) = payload.product_id {
        crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;
        active.product_id = Set(product_id);
    }
    let item = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", item.into(), Some(Meta::empty())))
}

pub async fn delete_wishlist_item(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Wishlist, _>(&state.orm, "wishlist item", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn user_wishlist(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<Vec<WishlistEntry>>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;
    let entries = sqlx::query_as::<_, WishlistEntry>(
        r#"
        SELECT w.id, w.user_id, w.product_id, w.added_date,
               p.name AS product_name, p.price, p.is_available
        FROM wishlist w
        JOIN products p ON p.id = w.product_id
        WHERE w.user_id = ?1
        ORDER BY w.added_date DESC, w.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(ApiResponse::list("User wishlist", entries))
}

pub async fn clear_user_wishlist(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<Deleted>> {
    let result = Wishlist::delete_many()
        .filter(Column::UserId.eq(user_id))
        .exec(&state.orm)
        .await?;
    tracing::info!(user_id, deleted = result.rows_affected, "wishlist cleared");
    Ok(ApiResponse::success(
        "Wishlist cleared",
        Deleted {
            deleted: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}

pub async fn is_in_wishlist(
    state: &AppState,
    user_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<WishlistCheck>> {
    let count = Wishlist::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ProductId.eq(product_id))
        .count(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Wishlist check",
        WishlistCheck {
            user_id,
            product_id,
            in_wishlist: count > 0,
        },
        None,
    ))
}
