use axum::extract::{Json, Path};
use contracts::domain::a007_product::aggregate::ProductDto;
use serde_json::{json, Value};

use crate::domain::a007_product::service;
use crate::shared::error::AppResult;

/// GET /api/products
pub async fn list() -> AppResult<Json<Value>> {
    let products = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": products.len(),
        "data": products,
    })))
}

/// GET /api/products/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let product = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": product })))
}

/// POST /api/products
pub async fn create(Json(dto): Json<ProductDto>) -> AppResult<Json<Value>> {
    let product = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": product })))
}

/// PUT /api/products/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<ProductDto>) -> AppResult<Json<Value>> {
    let product = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": product })))
}

/// DELETE /api/products/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}
