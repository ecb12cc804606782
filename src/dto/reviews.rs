use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: i32,
    pub user_id: i32,
    /// 1 to 5.
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct ReviewWithNames {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub user_id: i32,
    pub user_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductRating {
    pub product_id: i32,
    pub average_rating: f64,
    pub review_count: i64,
    /// One bucket per star value, 1 through 5.
    pub distribution: Vec<RatingBucket>,
}
