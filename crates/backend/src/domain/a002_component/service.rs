use contracts::domain::a002_component::aggregate::{Component, ComponentDto};
use serde::Deserialize;

use super::repository;
use crate::shared::error::{AppError, AppResult};

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// Catalog list query. Filtering and sorting run in memory over the
/// active set; the catalog is small enough for that to stay cheap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentListQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "priceMin")]
    pub price_min: Option<f64>,
    #[serde(rename = "priceMax")]
    pub price_max: Option<f64>,
    #[serde(rename = "inStock")]
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ComponentListResult {
    pub items: Vec<Component>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

pub async fn list(query: &ComponentListQuery) -> AppResult<ComponentListResult> {
    let mut components = repository::list_active().await?;

    if let Some(category) = &query.category {
        components.retain(|c| c.category_id.as_deref() == Some(category.as_str()));
    }
    if let Some(brand) = &query.brand {
        let brand = brand.to_lowercase();
        components.retain(|c| c.brand.to_lowercase() == brand);
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        components.retain(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.brand.to_lowercase().contains(&needle)
                || c.model.to_lowercase().contains(&needle)
                || c.tags.iter().any(|t| t.contains(&needle))
        });
    }
    if let Some(price_min) = query.price_min {
        components.retain(|c| c.price.amount >= price_min);
    }
    if let Some(price_max) = query.price_max {
        components.retain(|c| c.price.amount <= price_max);
    }
    if let Some(in_stock) = query.in_stock {
        components.retain(|c| c.availability.in_stock == in_stock);
    }
    if let Some(featured) = query.featured {
        components.retain(|c| c.is_featured == featured);
    }

    sort_components(&mut components, query.sort_by.as_deref());

    let total = components.len();
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let total_pages = total.div_ceil(limit).max(1);

    let items = components
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    Ok(ComponentListResult {
        items,
        total,
        page,
        total_pages,
    })
}

fn sort_components(components: &mut [Component], sort_by: Option<&str>) {
    match sort_by.unwrap_or("name") {
        "price-low" => components.sort_by(|a, b| {
            a.price
                .amount
                .partial_cmp(&b.price.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "price-high" => components.sort_by(|a, b| {
            b.price
                .amount
                .partial_cmp(&a.price.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "rating" => components.sort_by(|a, b| {
            b.ratings
                .average
                .partial_cmp(&a.ratings.average)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "popularity" => components.sort_by(|a, b| b.ratings.count.cmp(&a.ratings.count)),
        "newest" => components.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        _ => components.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
}

/// Distinct brands across the active catalog, sorted.
pub async fn list_brands() -> AppResult<Vec<String>> {
    let components = repository::list_active().await?;
    let mut brands: Vec<String> = components
        .into_iter()
        .map(|c| c.brand)
        .filter(|b| !b.is_empty())
        .collect();
    brands.sort();
    brands.dedup();
    Ok(brands)
}

pub async fn get(id: &str) -> AppResult<Component> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Component not found"))
}

pub async fn create(dto: &ComponentDto) -> AppResult<Component> {
    if let Some(category_id) = &dto.category_id {
        ensure_category_exists(category_id).await?;
    }
    let component = Component::new_for_insert(dto);
    component.validate().map_err(AppError::Validation)?;
    repository::insert(&component).await?;
    tracing::info!("Created component {}", component.display_name());
    Ok(component)
}

pub async fn update(id: &str, dto: &ComponentDto) -> AppResult<Component> {
    if let Some(category_id) = &dto.category_id {
        ensure_category_exists(category_id).await?;
    }
    let mut component = get(id).await?;
    component.apply(dto);
    component.validate().map_err(AppError::Validation)?;
    component.before_write();
    repository::update(&component).await?;
    Ok(component)
}

/// Hard delete, refused while any pre-built PC or user build still
/// references the component.
pub async fn delete(id: &str) -> AppResult<()> {
    let component = get(id).await?;

    let prebuild_refs =
        crate::domain::a003_prebuild_pc::repository::count_referencing_component(id).await?;
    let build_refs =
        crate::domain::a004_user_build::repository::count_referencing_component(id).await?;
    if prebuild_refs + build_refs > 0 {
        return Err(AppError::validation(format!(
            "Component '{}' is used by {} build(s) and cannot be deleted",
            component.display_name(),
            prebuild_refs + build_refs
        )));
    }

    repository::delete(id).await?;
    Ok(())
}

async fn ensure_category_exists(category_id: &str) -> AppResult<()> {
    if crate::domain::a001_category::repository::get_by_id(category_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("Unknown category"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_component::aggregate::{ComponentDto, ComponentPricing};
    use contracts::domain::common::Money;

    fn component(name: &str, price: f64, rating_count: i32) -> Component {
        let mut c = Component::new_for_insert(&ComponentDto {
            name: name.to_string(),
            pricing: Some(ComponentPricing {
                individual_price: Money::new(price),
                ..Default::default()
            }),
            ..Default::default()
        });
        c.ratings.count = rating_count;
        c
    }

    #[test]
    fn sorts_by_price_ascending() {
        let mut items = vec![
            component("b", 300.0, 0),
            component("a", 100.0, 0),
            component("c", 200.0, 0),
        ];
        sort_components(&mut items, Some("price-low"));
        let prices: Vec<f64> = items.iter().map(|c| c.price.amount).collect();
        assert_eq!(prices, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn popularity_sorts_by_rating_count() {
        let mut items = vec![
            component("a", 0.0, 2),
            component("b", 0.0, 9),
            component("c", 0.0, 5),
        ];
        sort_components(&mut items, Some("popularity"));
        let names: Vec<&str> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn default_sort_is_name_case_insensitive() {
        let mut items = vec![
            component("zeta", 0.0, 0),
            component("Alpha", 0.0, 0),
            component("beta", 0.0, 0),
        ];
        sort_components(&mut items, None);
        let names: Vec<&str> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }
}
