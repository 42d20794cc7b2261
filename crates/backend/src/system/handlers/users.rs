use axum::extract::{Json, Path};
use contracts::system::users::UpdateUserDto;
use serde_json::{json, Value};

use crate::shared::error::AppResult;
use crate::system::users::service;

/// GET /api/users (admin)
pub async fn list_users() -> AppResult<Json<Value>> {
    let users = service::list_all().await?;
    Ok(Json(json!({
        "status": "success",
        "results": users.len(),
        "data": users,
    })))
}

/// GET /api/users/:id (admin)
pub async fn get_user(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let user = service::get_by_id(&id)
        .await?
        .ok_or_else(|| crate::shared::error::AppError::not_found("User not found"))?;
    Ok(Json(json!({ "status": "success", "data": user })))
}

/// PATCH /api/users/:id (admin)
pub async fn update_user(
    Path(id): Path<String>,
    Json(dto): Json<UpdateUserDto>,
) -> AppResult<Json<Value>> {
    let user = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": user })))
}

/// DELETE /api/users/:id (admin)
pub async fn delete_user(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}
