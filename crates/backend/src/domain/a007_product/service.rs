use contracts::domain::a007_product::aggregate::{Product, ProductDto};

use super::repository;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<Product>> {
    Ok(repository::list_active().await?)
}

pub async fn get(id: &str) -> AppResult<Product> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))
}

pub async fn create(dto: &ProductDto) -> AppResult<Product> {
    let mut product = Product::new_for_insert(dto);
    product.validate().map_err(AppError::Validation)?;
    product.before_write();
    repository::insert(&product).await?;
    Ok(product)
}

pub async fn update(id: &str, dto: &ProductDto) -> AppResult<Product> {
    let mut product = get(id).await?;
    product.apply(dto);
    product.validate().map_err(AppError::Validation)?;
    product.before_write();
    repository::update(&product).await?;
    Ok(product)
}

/// Delete deactivates; existing orders keep their product snapshot.
pub async fn delete(id: &str) -> AppResult<()> {
    let mut product = get(id).await?;
    product.is_active = false;
    product.before_write();
    repository::update(&product).await?;
    Ok(())
}
