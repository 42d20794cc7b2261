use axum::extract::{Json, Path};
use contracts::domain::a001_category::aggregate::{CategoryDto, FieldDef};
use serde_json::{json, Value};

use crate::domain::a001_category::service;
use crate::shared::error::AppResult;

/// GET /api/categories
pub async fn list() -> AppResult<Json<Value>> {
    let categories = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": categories.len(),
        "data": categories,
    })))
}

/// GET /api/categories/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let category = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}

/// POST /api/categories
pub async fn create(Json(dto): Json<CategoryDto>) -> AppResult<Json<Value>> {
    let category = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}

/// PUT /api/categories/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<CategoryDto>) -> AppResult<Json<Value>> {
    let category = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}

/// DELETE /api/categories/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}

/// POST /api/categories/:id/fields
pub async fn add_field(Path(id): Path<String>, Json(field): Json<FieldDef>) -> AppResult<Json<Value>> {
    let category = service::add_field(&id, field).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}

/// PUT /api/categories/:id/fields/:field_id
pub async fn update_field(
    Path((id, field_id)): Path<(String, String)>,
    Json(field): Json<FieldDef>,
) -> AppResult<Json<Value>> {
    let category = service::update_field(&id, &field_id, field).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}

/// DELETE /api/categories/:id/fields/:field_id
pub async fn remove_field(Path((id, field_id)): Path<(String, String)>) -> AppResult<Json<Value>> {
    let category = service::remove_field(&id, &field_id).await?;
    Ok(Json(json!({ "status": "success", "data": category })))
}
