use axum::extract::{Json, Path, Query};
use contracts::domain::a004_user_build::aggregate::{BuildType, UserBuildDto};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a004_user_build::service;
use crate::shared::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct UserBuildListQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "buildType")]
    pub build_type: Option<BuildType>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
}

/// GET /api/user-builds
pub async fn list(Query(query): Query<UserBuildListQuery>) -> AppResult<Json<Value>> {
    let filter = service::BuildListFilter {
        user_id: query.user_id,
        build_type: query.build_type,
        is_public: query.is_public,
    };
    let builds = service::list(&filter).await?;
    Ok(Json(json!({
        "status": "success",
        "results": builds.len(),
        "data": builds,
    })))
}

/// GET /api/user-builds/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let build = service::get(&id).await?;
    Ok(Json(json!({ "status": "success", "data": build })))
}

/// POST /api/user-builds
pub async fn create(Json(dto): Json<UserBuildDto>) -> AppResult<Json<Value>> {
    let assembled = service::create(&dto).await?;
    Ok(Json(json!({
        "status": "success",
        "data": assembled.build,
        "warnings": assembled.warnings,
    })))
}

/// PUT /api/user-builds/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<UserBuildDto>) -> AppResult<Json<Value>> {
    let assembled = service::update(&id, &dto).await?;
    Ok(Json(json!({
        "status": "success",
        "data": assembled.build,
        "warnings": assembled.warnings,
    })))
}

/// DELETE /api/user-builds/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}
