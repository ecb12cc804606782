use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::wishlist::{CreateWishlistRequest, UpdateWishlistRequest, WishlistCheck, WishlistEntry},
    error::AppResult,
    models::WishlistItem,
    response::{ApiResponse, Deleted},
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist))
        .route("/user/{id}", get(user_wishlist))
        .route("/user/{id}/clear", delete(clear_user_wishlist))
        .route("/check/{id}/{product_id}", get(check_wishlist))
        .route(
            "/{id}",
            get(get_wishlist_item)
                .patch(update_wishlist_item)
                .delete(delete_wishlist_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses((status = 200, description = "Every wishlist row", body = ApiResponse<Vec<WishlistItem>>)),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<WishlistItem>>>> {
    Ok(Json(wishlist_service::list_wishlist(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Wishlist of the user with product data", body = ApiResponse<Vec<WishlistEntry>>),
        (status = 404, description = "User not found"),
    ),
    tag = "Wishlist"
)]
pub async fn user_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<WishlistEntry>>>> {
    Ok(Json(wishlist_service::user_wishlist(&state, user_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/user/{id}/clear",
    params(("id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "Number of removed rows", body = ApiResponse<Deleted>)),
    tag = "Wishlist"
)]
pub async fn clear_user_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(wishlist_service::clear_user_wishlist(&state, user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/check/{id}/{product_id}",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses((status = 200, description = "Whether the product is on the wishlist", body = ApiResponse<WishlistCheck>)),
    tag = "Wishlist"
)]
pub async fn check_wishlist(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<WishlistCheck>>> {
    Ok(Json(
        wishlist_service::is_in_wishlist(&state, user_id, product_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}",
    params(("id" = i32, Path, description = "Wishlist item ID")),
    responses(
        (status = 200, description = "Wishlist item", body = ApiResponse<WishlistItem>),
        (status = 404, description = "Wishlist item not found"),
    ),
    tag = "Wishlist"
)]
pub async fn get_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<WishlistItem>>> {
    Ok(Json(wishlist_service::get_wishlist_item(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = CreateWishlistRequest,
    responses(
        (status = 201, description = "Product added to the wishlist", body = ApiResponse<WishlistItem>),
        (status = 404, description = "User or product not found"),
    ),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Json(payload): Json<CreateWishlistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WishlistItem>>)> {
    let resp = wishlist_service::add_to_wishlist(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/wishlist/{id}",
    params(("id" = i32, Path, description = "Wishlist item ID")),
    request_body = UpdateWishlistRequest,
    responses(
        (status = 200, description = "Wishlist item updated", body = ApiResponse<WishlistItem>),
        (status = 404, description = "Wishlist item not found"),
    ),
    tag = "Wishlist"
)]
pub async fn update_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWishlistRequest>,
) -> AppResult<Json<ApiResponse<WishlistItem>>> {
    Ok(Json(wishlist_service::update_wishlist_item(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}",
    params(("id" = i32, Path, description = "Wishlist item ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Wishlist"
)]
pub async fn delete_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(wishlist_service::delete_wishlist_item(&state, id).await?))
}
