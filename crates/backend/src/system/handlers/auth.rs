use axum::extract::{Json, Path};
use contracts::system::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    UserInfo,
};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, password};
use crate::system::mail::default_mailer;
use crate::system::users::{repository as user_repository, service as user_service};

const RESET_TOKEN_LIFETIME_MINUTES: i64 = 60;

fn user_info(user: contracts::system::users::User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        is_admin: user.is_admin,
    }
}

/// POST /api/auth/register
pub async fn register(Json(request): Json<RegisterRequest>) -> AppResult<Json<Value>> {
    let user = user_service::register(&request.username, &request.email, &request.password).await?;
    let token = jwt::generate_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(json!({
        "status": "success",
        "data": LoginResponse { token, user: user_info(user) },
    })))
}

/// POST /api/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> AppResult<Json<Value>> {
    let user = user_service::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = jwt::generate_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(json!({
        "status": "success",
        "data": LoginResponse { token, user: user_info(user) },
    })))
}

/// POST /api/auth/admin/login - same as login but rejects non-admins
pub async fn admin_login(Json(request): Json<LoginRequest>) -> AppResult<Json<Value>> {
    let user = user_service::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin {
        return Err(AppError::Forbidden);
    }

    let token = jwt::generate_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(json!({
        "status": "success",
        "data": LoginResponse { token, user: user_info(user) },
    })))
}

/// GET /api/auth/me
pub async fn current_user(CurrentUser(claims): CurrentUser) -> AppResult<Json<Value>> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(json!({
        "status": "success",
        "data": user_info(user),
    })))
}

fn hash_reset_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// POST /api/auth/forgot-password
///
/// Responds identically whether or not the email exists, so the
/// endpoint cannot be used to probe for accounts.
pub async fn forgot_password(Json(request): Json<ForgotPasswordRequest>) -> AppResult<Json<Value>> {
    let ok = Json(json!({
        "status": "success",
        "message": "If the email is registered, a reset link has been sent",
    }));

    let user = match user_repository::get_by_email(&request.email.trim().to_lowercase()).await? {
        Some(user) => user,
        None => return Ok(ok),
    };

    let token = uuid::Uuid::new_v4().to_string();
    let token_hash = hash_reset_token(&token);
    let expires_at = (chrono::Utc::now() + chrono::Duration::minutes(RESET_TOKEN_LIFETIME_MINUTES))
        .to_rfc3339();

    user_repository::set_reset_token(&user.id, &token_hash, &expires_at).await?;

    let mailer = default_mailer();
    let body = format!(
        "A password reset was requested for your account.\n\
         Use this token within {} minutes: {}",
        RESET_TOKEN_LIFETIME_MINUTES, token
    );
    if let Err(err) = mailer.send(&user.email, "Password reset", &body).await {
        // Token must not linger when the mail never went out
        user_repository::clear_reset_token(&user.id).await?;
        tracing::error!("Failed to send reset mail: {err:#}");
        return Err(AppError::Internal(err));
    }

    Ok(ok)
}

/// PATCH /api/auth/reset-password/:token
pub async fn reset_password(
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<Value>> {
    password::validate_password_strength(&request.password).map_err(AppError::Validation)?;

    let token_hash = hash_reset_token(&token);
    let now = chrono::Utc::now().to_rfc3339();
    let user = user_repository::find_by_reset_token(&token_hash, &now)
        .await?
        .ok_or_else(|| AppError::validation("Reset token is invalid or has expired"))?;

    let password_hash = password::hash_password(&request.password)?;
    user_repository::update_password(&user.id, &password_hash).await?;
    user_repository::clear_reset_token(&user.id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Password has been reset",
    })))
}
