use axum::extract::{Json, Multipart, Path};
use contracts::domain::a006_supplier::aggregate::SupplierDto;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a006_supplier::service;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;

/// GET /api/suppliers
pub async fn list() -> AppResult<Json<Value>> {
    let suppliers = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": suppliers.len(),
        "data": suppliers,
    })))
}

/// GET /api/suppliers/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let supplier = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

/// POST /api/suppliers
pub async fn create(Json(dto): Json<SupplierDto>) -> AppResult<Json<Value>> {
    let supplier = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

/// PUT /api/suppliers/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<SupplierDto>) -> AppResult<Json<Value>> {
    let supplier = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

/// DELETE /api/suppliers/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// POST /api/suppliers/:id/comments
pub async fn add_comment(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> AppResult<Json<Value>> {
    let supplier = service::add_comment(&id, &request.content, &claims.username).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: u8,
    pub comment: Option<String>,
}

/// POST /api/suppliers/:id/ratings
pub async fn add_rating(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> AppResult<Json<Value>> {
    let supplier =
        service::add_rating(&id, request.rating, request.comment, &claims.username).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub price: f64,
}

/// POST /api/suppliers/:id/products
pub async fn set_product_price(
    Path(id): Path<String>,
    Json(request): Json<OfferRequest>,
) -> AppResult<Json<Value>> {
    let supplier = service::set_product_price(&id, &request.product_id, request.price).await?;
    Ok(Json(json!({ "status": "success", "data": supplier })))
}

/// POST /api/suppliers/import - multipart upload of a CSV file
pub async fn import(mut multipart: Multipart) -> AppResult<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read upload: {}", e)))?;
            let report = service::import_csv(&data).await?;
            return Ok(Json(json!({ "status": "success", "data": report })));
        }
    }
    Err(AppError::validation("Missing 'file' field in upload"))
}
