use contracts::domain::a001_category::aggregate::{Category, CategoryDto, FieldDef};

use super::repository;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<Category>> {
    Ok(repository::list_all().await?)
}

pub async fn get(id: &str) -> AppResult<Category> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))
}

pub async fn create(dto: &CategoryDto) -> AppResult<Category> {
    let mut category = Category::new_for_insert(dto);
    category.validate().map_err(AppError::Validation)?;

    if let Some(existing) = repository::get_by_name_ci(&category.name).await? {
        if existing.id != category.id {
            return Err(AppError::validation(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
    }

    category.before_write();
    repository::insert(&category).await?;
    tracing::info!("Created category {}", category.name);
    Ok(category)
}

pub async fn update(id: &str, dto: &CategoryDto) -> AppResult<Category> {
    let mut category = get(id).await?;
    category.apply(dto);
    category.validate().map_err(AppError::Validation)?;

    if let Some(existing) = repository::get_by_name_ci(&category.name).await? {
        if existing.id != category.id {
            return Err(AppError::validation(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
    }

    category.before_write();
    repository::update(&category).await?;
    Ok(category)
}

/// Delete is a soft deactivate; components keep their weak reference.
pub async fn delete(id: &str) -> AppResult<()> {
    let mut category = get(id).await?;
    category.is_active = false;
    category.before_write();
    repository::update(&category).await?;
    Ok(())
}

pub async fn add_field(id: &str, field: FieldDef) -> AppResult<Category> {
    let mut category = get(id).await?;
    category.add_field(field).map_err(AppError::Validation)?;
    category.before_write();
    repository::update(&category).await?;
    Ok(category)
}

pub async fn update_field(id: &str, field_id: &str, field: FieldDef) -> AppResult<Category> {
    let mut category = get(id).await?;
    category
        .update_field(field_id, field)
        .map_err(AppError::Validation)?;
    category.before_write();
    repository::update(&category).await?;
    Ok(category)
}

pub async fn remove_field(id: &str, field_id: &str) -> AppResult<Category> {
    let mut category = get(id).await?;
    category
        .remove_field(field_id)
        .map_err(AppError::Validation)?;
    category.before_write();
    repository::update(&category).await?;
    Ok(category)
}
