use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error")]
    DbError(sqlx::Error),

    #[error("ORM error")]
    OrmError(DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound(format!("{entity} {id}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn is_check_violation(message: &str) -> bool {
    message.contains("CHECK constraint failed")
}

fn is_foreign_key_violation(message: &str) -> bool {
    message.contains("FOREIGN KEY constraint failed")
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => AppError::BadRequest(msg),
            _ if is_check_violation(&err.to_string())
                || is_foreign_key_violation(&err.to_string()) =>
            {
                AppError::BadRequest(err.to_string())
            }
            _ => AppError::OrmError(err),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => return AppError::Conflict(message),
                sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::CheckViolation
                | sqlx::error::ErrorKind::NotNullViolation => {
                    return AppError::BadRequest(message);
                }
                _ if is_check_violation(&message) || is_foreign_key_violation(&message) => {
                    return AppError::BadRequest(message);
                }
                _ => {}
            }
        }
        AppError::DbError(err)
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::DbError(err) => {
                tracing::error!(error = %err, "database failure");
                self.to_string()
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "orm failure");
                self.to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal failure");
                self.to_string()
            }
            other => {
                tracing::warn!(status = %status, error = %other, "request rejected");
                other.to_string()
            }
        };

        let body = ApiResponse {
            message: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            data: Some(ErrorData { error: detail }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_invalid_map_to_distinct_statuses() {
        assert_eq!(AppError::not_found("product", 4).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("quantity".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict("email".into()).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = AppError::not_found("address", 12);
        assert_eq!(err.to_string(), "Not Found: address 12");
    }

    #[test]
    fn check_constraint_text_from_orm_becomes_bad_request() {
        let err: AppError =
            DbErr::Custom("CHECK constraint failed: quantity >= 1".to_string()).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn unrelated_orm_errors_stay_internal() {
        let err: AppError = DbErr::Custom("connection reset".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
