use axum::extract::{Json, Path};
use contracts::domain::a005_compatibility_rule::aggregate::CompatibilityRuleDto;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a005_compatibility_rule::service;
use crate::shared::error::AppResult;

/// GET /api/compatibility-rules
pub async fn list() -> AppResult<Json<Value>> {
    let rules = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": rules.len(),
        "data": rules,
    })))
}

/// GET /api/compatibility-rules/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let rule = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": rule })))
}

/// POST /api/compatibility-rules
pub async fn create(Json(dto): Json<CompatibilityRuleDto>) -> AppResult<Json<Value>> {
    let rule = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": rule })))
}

/// PUT /api/compatibility-rules/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<CompatibilityRuleDto>,
) -> AppResult<Json<Value>> {
    let rule = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": rule })))
}

/// DELETE /api/compatibility-rules/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(rename = "componentA")]
    pub component_a: String,
    #[serde(rename = "componentB")]
    pub component_b: String,
}

/// POST /api/compatibility-rules/check
pub async fn check(Json(request): Json<CheckRequest>) -> AppResult<Json<Value>> {
    let verdict = service::check(&request.component_a, &request.component_b).await?;
    Ok(Json(json!({ "status": "success", "data": verdict })))
}
