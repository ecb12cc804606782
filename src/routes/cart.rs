use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::cart::{
        AddToCartRequest, CartLine, CartSummary, RemoveFromCartRequest, UpdateCartItemRequest,
        UpdateCartQuantityRequest,
    },
    error::AppResult,
    models::CartItem,
    response::{ApiResponse, Deleted},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cart_items).post(add_to_cart))
        .route("/add", post(add_to_cart))
        .route("/update", put(update_quantity))
        .route("/remove", delete(remove_from_cart))
        .route("/user/{id}", get(user_cart))
        .route("/user/{id}/clear", delete(clear_user_cart))
        .route("/product/{id}", get(carts_with_product))
        .route("/total/{id}", get(cart_total))
        .route("/summary/{id}", get(cart_summary))
        .route(
            "/{id}",
            get(get_cart_item)
                .patch(update_cart_item)
                .delete(delete_cart_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses((status = 200, description = "Every cart row", body = ApiResponse<Vec<CartItem>>)),
    tag = "Cart"
)]
pub async fn list_cart_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CartItem>>>> {
    Ok(Json(cart_service::list_cart_items(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/{id}",
    params(("id" = i32, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Cart item", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "Cart"
)]
pub async fn get_cart_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    Ok(Json(cart_service::get_cart_item(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item added or quantity increased", body = ApiResponse<CartItem>),
        (status = 400, description = "Quantity must be positive"),
        (status = 404, description = "User or product not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartItem>>)> {
    let resp = cart_service::add_to_cart(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/cart/update",
    request_body = UpdateCartQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced", body = ApiResponse<CartItem>),
        (status = 404, description = "Product is not in the cart"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCartQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    Ok(Json(cart_service::update_quantity(&state, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/remove",
    request_body = RemoveFromCartRequest,
    responses((status = 200, description = "Number of removed rows", body = ApiResponse<Deleted>)),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Json(payload): Json<RemoveFromCartRequest>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(cart_service::remove_from_cart(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Cart lines with product names and prices", body = ApiResponse<Vec<CartLine>>),
        (status = 404, description = "User not found"),
    ),
    tag = "Cart"
)]
pub async fn user_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<CartLine>>>> {
    Ok(Json(cart_service::user_cart(&state, user_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/user/{id}/clear",
    params(("id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "Number of removed rows", body = ApiResponse<Deleted>)),
    tag = "Cart"
)]
pub async fn clear_user_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(cart_service::clear_user_cart(&state, user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Cart rows holding the product", body = ApiResponse<Vec<CartItem>>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Cart"
)]
pub async fn carts_with_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<CartItem>>>> {
    Ok(Json(cart_service::carts_with_product(&state, product_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/total/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Cart total for the user", body = ApiResponse<CartSummary>),
        (status = 404, description = "User not found"),
    ),
    tag = "Cart"
)]
pub async fn cart_total(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    Ok(Json(cart_service::cart_summary(&state, user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/summary/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Cart totals and counts", body = ApiResponse<CartSummary>),
        (status = 404, description = "User not found"),
    ),
    tag = "Cart"
)]
pub async fn cart_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    Ok(Json(cart_service::cart_summary(&state, user_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{id}",
    params(("id" = i32, Path, description = "Cart item ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Cart item updated", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    Ok(Json(cart_service::update_cart_item(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    params(("id" = i32, Path, description = "Cart item ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Cart"
)]
pub async fn delete_cart_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(cart_service::delete_cart_item(&state, id).await?))
}
