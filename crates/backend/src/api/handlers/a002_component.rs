use axum::extract::{Json, Path, Query};
use contracts::domain::a002_component::aggregate::ComponentDto;
use serde_json::{json, Value};

use crate::domain::a002_component::service::{self, ComponentListQuery};
use crate::shared::error::AppResult;

/// GET /api/components
pub async fn list(Query(query): Query<ComponentListQuery>) -> AppResult<Json<Value>> {
    let result = service::list(&query).await?;
    let brands = service::list_brands().await?;
    Ok(Json(json!({
        "status": "success",
        "results": result.items.len(),
        "totalResults": result.total,
        "currentPage": result.page,
        "totalPages": result.total_pages,
        "brands": brands,
        "data": result.items,
    })))
}

/// GET /api/components/brands
pub async fn list_brands() -> AppResult<Json<Value>> {
    let brands = service::list_brands().await?;
    Ok(Json(json!({ "status": "success", "data": brands })))
}

/// GET /api/components/:id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<Value>> {
    let component = service::get(&id).await?;
    let availability_status = component.availability_status();
    Ok(Json(json!({
        "status": "success",
        "data": component,
        "availabilityStatus": availability_status,
    })))
}

/// POST /api/components
pub async fn create(Json(dto): Json<ComponentDto>) -> AppResult<Json<Value>> {
    let component = service::create(&dto).await?;
    Ok(Json(json!({ "status": "success", "data": component })))
}

/// PUT /api/components/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<ComponentDto>,
) -> AppResult<Json<Value>> {
    let component = service::update(&id, &dto).await?;
    Ok(Json(json!({ "status": "success", "data": component })))
}

/// DELETE /api/components/:id
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<Value>> {
    service::delete(&id).await?;
    Ok(Json(json!({ "status": "success", "data": null })))
}
