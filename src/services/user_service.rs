use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Deleted, Meta},
    services::crud,
    state::AppState,
};

/// Hash a plaintext password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    if password.is_empty() {
        return Err(AppError::BadRequest("password must not be empty".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest(format!("invalid email `{email}`")));
    }
    Ok(email)
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<Vec<User>>> {
    let users: Vec<User> = Users::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(ApiResponse::list("Users", users))
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<ApiResponse<User>> {
    let user = crud::find_or_404::<Users, _>(&state.orm, "user", id).await?;
    Ok(ApiResponse::success("User", user.into(), None))
}

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let email = normalize_email(&payload.email)?;
    let password_hash = hash_password(&payload.password)?;

    let user = ActiveModel {
        id: NotSet,
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        phone: Set(payload.phone),
        registration_date: Set(Utc::now()),
        is_admin: Set(payload.is_admin),
        last_login_date: Set(None),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(ApiResponse::success(
        "User created",
        user.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    id: i32,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = crud::find_or_404::<Users, _>(&state.orm, "user", id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(email) = payload.email {
        active.email = Set(normalize_email(&email)?);
    }
    if let Some(password) = payload.password {
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(is_admin) = payload.is_admin {
        active.is_admin = Set(is_admin);
    }

    let user = active.update(&state.orm).await?;
    tracing::info!(user_id = user.id, "user updated");
    Ok(ApiResponse::success("Updated", user.into(), Some(Meta::empty())))
}

pub async fn delete_user(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let deleted = crud::delete_by_id::<Users, _>(&state.orm, "user", id).await?;
    Ok(ApiResponse::success("Deleted", deleted, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn hashed_password_verifies_and_hides_plaintext() {
        let hash = hash_password("s3cret-pass").expect("hash");
        assert!(!hash.contains("s3cret-pass"));
        let parsed = PasswordHash::new(&hash).expect("parse");
        assert!(
            Argon2::default()
                .verify_password(b"s3cret-pass", &parsed)
                .is_ok()
        );
    }

    #[test]
    fn each_hash_gets_a_fresh_salt() {
        let first = hash_password("same-pass").expect("hash");
        let second = hash_password("same-pass").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(hash_password(""), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Ann@Example.COM ").expect("email"),
            "ann@example.com"
        );
        assert!(normalize_email("nobody").is_err());
    }
}
