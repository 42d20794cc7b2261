use anyhow::Result;
use contracts::system::users::{UpdateUserDto, User};

use super::repository;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::password;

/// Register a new user account. Accounts are never created as admins;
/// the flag is granted through the admin user-management endpoints.
pub async fn register(username: &str, email: &str, raw_password: &str) -> AppResult<User> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    password::validate_password_strength(raw_password).map_err(AppError::Validation)?;

    if repository::get_by_email(&email).await?.is_some() {
        return Err(AppError::validation("Email is already registered"));
    }
    if repository::get_by_username(username).await?.is_some() {
        return Err(AppError::validation("Username is already taken"));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        email,
        is_active: true,
        is_admin: false,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    let password_hash = password::hash_password(raw_password)?;
    repository::create_with_password(&user, &password_hash).await?;

    tracing::info!("Registered user {}", user.username);
    Ok(user)
}

/// Verify email + password. Returns None on any mismatch, without
/// distinguishing unknown email from wrong password.
pub async fn verify_credentials(email: &str, raw_password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_email(&email.trim().to_lowercase()).await? {
        Some(user) if user.is_active => user,
        _ => return Ok(None),
    };

    let hash = match repository::get_password_hash(&user.id).await? {
        Some(hash) => hash,
        None => return Ok(None),
    };

    if !password::verify_password(raw_password, &hash)? {
        return Ok(None);
    }

    repository::update_last_login(&user.id).await?;
    Ok(Some(user))
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

pub async fn update(id: &str, dto: &UpdateUserDto) -> AppResult<User> {
    let mut user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(email) = &dto.email {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AppError::validation("A valid email is required"));
        }
        if let Some(other) = repository::get_by_email(&email).await? {
            if other.id != user.id {
                return Err(AppError::validation("Email is already registered"));
            }
        }
        user.email = email;
    }
    if let Some(is_active) = dto.is_active {
        user.is_active = is_active;
    }
    if let Some(is_admin) = dto.is_admin {
        user.is_admin = is_admin;
    }
    user.updated_at = chrono::Utc::now().to_rfc3339();

    repository::update(&user).await?;
    Ok(user)
}

pub async fn delete(id: &str) -> AppResult<()> {
    if !repository::delete(id).await? {
        return Err(AppError::not_found("User not found"));
    }
    Ok(())
}
