use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::reviews::{CreateReviewRequest, ProductRating, ReviewWithNames, UpdateReviewRequest},
    error::AppResult,
    models::Review,
    response::{ApiResponse, Deleted},
    routes::params::LimitQuery,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/recent", get(recent_reviews))
        .route("/product/{id}", get(product_reviews))
        .route("/product/{id}/rating", get(product_rating))
        .route("/user/{id}", get(user_reviews))
        .route(
            "/{id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses((status = 200, description = "All reviews", body = ApiResponse<Vec<Review>>)),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Review>>>> {
    Ok(Json(review_service::list_reviews(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/recent",
    params(LimitQuery),
    responses((status = 200, description = "Newest reviews first", body = ApiResponse<Vec<ReviewWithNames>>)),
    tag = "Reviews"
)]
pub async fn recent_reviews(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<Vec<ReviewWithNames>>>> {
    Ok(Json(review_service::recent_reviews(&state, query.resolve()).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Reviews of the product", body = ApiResponse<Vec<ReviewWithNames>>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Reviews"
)]
pub async fn product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<ReviewWithNames>>>> {
    Ok(Json(review_service::product_reviews(&state, product_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/product/{id}/rating",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Average rating and distribution", body = ApiResponse<ProductRating>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Reviews"
)]
pub async fn product_rating(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductRating>>> {
    Ok(Json(review_service::product_rating(&state, product_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Reviews written by the user", body = ApiResponse<Vec<ReviewWithNames>>),
        (status = 404, description = "User not found"),
    ),
    tag = "Reviews"
)]
pub async fn user_reviews(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<ReviewWithNames>>>> {
    Ok(Json(review_service::user_reviews(&state, user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ApiResponse<Review>),
        (status = 404, description = "Review not found"),
    ),
    tag = "Reviews"
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Review>>> {
    Ok(Json(review_service::get_review(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<Review>),
        (status = 400, description = "Rating outside 1 to 5"),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let resp = review_service::create_review(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 404, description = "Review not found"),
    ),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    Ok(Json(review_service::update_review(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses((status = 200, description = "Number of deleted rows", body = ApiResponse<Deleted>)),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    Ok(Json(review_service::delete_review(&state, id).await?))
}
