use axum::extract::{Json, Path};
use contracts::domain::a003_prebuild_pc::aggregate::PreBuildPcDto;
use serde_json::{json, Value};

use crate::domain::a003_prebuild_pc::service;
use crate::shared::error::AppResult;

/// GET /api/prebuild-pcs
pub async fn list() -> AppResult<Json<Value>> {
    let builds = service::list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": builds.len(),
        "data": builds,
    })))
}

/// GET /api/prebuild-pcs/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let pc = service::get(&id).await?;
    let availability_status = pc.availability.status();
    Ok(Json(json!({
        "status": "success",
        "data": pc,
        "availabilityStatus": availability_status,
    })))
}

/// POST /api/prebuild-pcs
pub async fn create(Json(dto): Json<PreBuildPcDto>) -> AppResult<Json<Value>> {
    let pc = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": pc })))
}

/// PUT /api/prebuild-pcs/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<PreBuildPcDto>,
) -> AppResult<Json<Value>> {
    let pc = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": pc })))
}

/// DELETE /api/prebuild-pcs/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}

/// GET /api/prebuild-pcs/build/components/:category_id
pub async fn components_for_slot(Path(category_id): Path<String>) -> AppResult<Json<Value>> {
    let components = service::components_for_slot(&category_id).await?;
    Ok(Json(json!({
        "status": "success",
        "results": components.len(),
        "data": components,
    })))
}
