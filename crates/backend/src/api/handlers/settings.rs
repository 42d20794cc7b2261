use axum::extract::Json;
use contracts::system::settings::AppSettings;
use serde_json::{json, Value};

use crate::shared::error::AppResult;
use crate::shared::settings::{load_app_settings, save_app_settings};

/// GET /api/settings
pub async fn get() -> AppResult<Json<Value>> {
    let settings = load_app_settings().await?;
    Ok(Json(json!({ "status": "success", "data": settings })))
}

/// PUT /api/settings
pub async fn update(Json(settings): Json<AppSettings>) -> AppResult<Json<Value>> {
    save_app_settings(&settings).await?;
    Ok(Json(json!({ "status": "success", "data": settings })))
}
