use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    dto::reviews::{
        CreateReviewRequest, ProductRating, RatingBucket, ReviewWithNames, UpdateReviewRequest,
    },
    entity::{
        products::Entity as Products,
        reviews::{ActiveModel, Column, Entity as Reviews},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::Review,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

const REVIEW_WITH_NAMES: &str = r#"
    SELECT r.id, r.product_id, p.name AS product_name,
           r.user_id, u.first_name || ' ' || u.last_name AS user_name,
           r.rating, r.comment, r.review_date
    FROM reviews r
    JOIN products p ON p.id = r.product_id
    JOIN users u ON u.id = r.user_id
"#;

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    Ok(())
}

pub async fn list_reviews(state: &AppState) -> AppResult<ApiResponse<Vec<Review>>> {
    let reviews: Vec<Review> = Reviews::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(ApiResponse::list("Reviews", reviews))
}

pub async fn get_review(state: &AppState, id: i32) -> AppResult<ApiResponse<Review>> {
    let review = crud::find_or_404::<Reviews, _>(&state.orm, "review", id).await?;
    Ok(ApiResponse::success("Review", review.into(), None))
}

pub async fn create_review(
    state: &AppState,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    validate_rating(payload.rating)?;
    crud::find_or_404::<Products, _>(&state.orm, "product", payload.product_id).await?;
    crud::find_or_404::<Users, _>(&state.orm, "user", payload.user_id).await?;

    let review = ActiveModel {
        id: NotSet,
        product_id: Set(payload.product_id),
        user_id: Set(payload.user_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        review_date: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        review_id = review.id,
        product_id = review.product_id,
        rating = review.rating,
        "review created"
    );
    Ok(ApiResponse::success(
        "Review created",
        review.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_review(
    state: &AppState,
    id: i32,
    payload: UpdateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let existing = crud::find_or_404::<Reviews, _>(&state.orm, "review", id).await?;
    let mut active: ActiveModel = existing.into();
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
        active.rating = Set(rating);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(Some(comment));
    }
    let review = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Updated", review.into(), Some(Meta::empty())))
}

pub async fn delete_review(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Reviews, _>(&state.orm, "review", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

pub async fn product_reviews(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<Vec<ReviewWithNames>>> {
    crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;
    let sql = format!(
        "{REVIEW_WITH_NAMES} WHERE r.product_id = ?1 ORDER BY r.review_date DESC, r.id DESC"
    );
    let reviews = sqlx::query_as::<_, ReviewWithNames>(&sql)
        .bind(product_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(ApiResponse::list("Product reviews", reviews))
}

pub async fn user_reviews(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<Vec<ReviewWithNames>>> {
    crud::find_or_404::<Users, _>(&state.orm, "user", user_id).await?;
    let sql = format!(
        "{REVIEW_WITH_NAMES} WHERE r.user_id = ?1 ORDER BY r.review_date DESC, r.id DESC"
    );
    let reviews = sqlx::query_as::<_, ReviewWithNames>(&sql)
        .bind(user_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(ApiResponse::list("User reviews", reviews))
}

pub async fn recent_reviews(
    state: &AppState,
    limit: u32,
) -> AppResult<ApiResponse<Vec<ReviewWithNames>>> {
    let sql = format!("{REVIEW_WITH_NAMES} ORDER BY r.review_date DESC, r.id DESC LIMIT ?1");
    let reviews = sqlx::query_as::<_, ReviewWithNames>(&sql)
        .bind(i64::from(limit))
        .fetch_all(&state.pool)
        .await?;
    Ok(ApiResponse::list("Recent reviews", reviews))
}

/// Average rating, review count and a 1..5 histogram. A product without
/// reviews has an average of 0.
pub async fn product_rating(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<ProductRating>> {
    crud::find_or_404::<Products, _>(&state.orm, "product", product_id).await?;

    let (average_rating, review_count): (f64, i64) = sqlx::query_as(
        r#"
        SELECT COALESCE(AVG(CAST(rating AS REAL)), 0.0), COUNT(id)
        FROM reviews
        WHERE product_id = ?1
        "#,
    )
    .bind(product_id)
    .fetch_one(&state.pool)
    .await?;

    let counts: Vec<(i32, i64)> = sqlx::query_as(
        r#"
        SELECT rating, COUNT(id)
        FROM reviews
        WHERE product_id = ?1
        GROUP BY rating
        "#,
    )
    .bind(product_id)
    .fetch_all(&state.pool)
    .await?;

    let distribution = (1..=5)
        .map(|rating| RatingBucket {
            rating,
            count: counts
                .iter()
                .find(|(r, _)| *r == rating)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect();

    Ok(ApiResponse::success(
        "Product rating",
        ProductRating {
            product_id,
            average_rating,
            review_count,
            distribution,
        },
        None,
    ))
}
