use axum::extract::{Json, Path};
use contracts::domain::a008_order::aggregate::OrderDto;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a008_order::service;
use crate::shared::error::AppResult;

/// GET /api/orders
pub async fn list() -> AppResult<Json<Value>> {
    let orders = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": orders.len(),
        "data": orders,
    })))
}

/// GET /api/orders/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let order = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": order })))
}

/// POST /api/orders
pub async fn create(Json(dto): Json<OrderDto>) -> AppResult<Json<Value>> {
    let order = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": order })))
}

/// PUT /api/orders/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<OrderDto>) -> AppResult<Json<Value>> {
    let order = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": order })))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// PATCH /api/orders/:id/status
pub async fn update_status(
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> AppResult<Json<Value>> {
    let order = service::update_status(&id, &request.status).await?;
    Ok(Json(json!({ "status": "success", "data": order })))
}

/// DELETE /api/orders/:id - cancels rather than erases
pub async fn cancel(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let order = service::cancel(&id).await?;
    Ok(Json(json!({ "status": "success", "data": order })))
}

/// GET /api/orders/analytics
pub async fn analytics() -> AppResult<Json<Value>> {
    let analytics = service::analytics().await?;
    Ok(Json(json!({ "status": "success", "data": analytics })))
}

/// GET /api/orders/product/:id/suppliers
pub async fn product_offers(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let offers = service::product_offers(&id).await?;
    Ok(Json(json!({
        "status": "success",
        "results": offers.len(),
        "data": offers,
    })))
}
