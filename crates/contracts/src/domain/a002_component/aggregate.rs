use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{slugify, Money};

/// Stock level below which a component counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// The three price views of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPricing {
    /// Wholesale cost.
    #[serde(default)]
    pub cost: Money,
    /// Stand-alone retail price.
    #[serde(rename = "individualPrice", default)]
    pub individual_price: Money,
    /// Price when sold as part of an assembled build.
    #[serde(rename = "buildPrice", default)]
    pub build_price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    #[serde(rename = "inStock", default = "default_true")]
    pub in_stock: bool,
    #[serde(rename = "stockCount", default)]
    pub stock_count: i32,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            in_stock: true,
            stock_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl Availability {
    pub fn status(&self) -> AvailabilityStatus {
        if !self.in_stock || self.stock_count == 0 {
            AvailabilityStatus::OutOfStock
        } else if self.stock_count < LOW_STOCK_THRESHOLD {
            AvailabilityStatus::LowStock
        } else {
            AvailabilityStatus::InStock
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub count: i32,
}

/// Catalog component (CPU, GPU, RAM, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    /// Weak reference to the owning category.
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: ComponentPricing,
    /// Legacy single price, kept in sync with `pricing.individual_price`.
    #[serde(default)]
    pub price: Money,
    /// Category-dependent key-value specs.
    #[serde(rename = "technicalSpecs", default)]
    pub technical_specs: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub ratings: Ratings,
    /// Hard incompatibility overrides (component ids).
    #[serde(rename = "incompatibleWith", default)]
    pub incompatible_with: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: Option<ComponentPricing>,
    #[serde(rename = "technicalSpecs")]
    pub technical_specs: Option<serde_json::Map<String, serde_json::Value>>,
    pub availability: Option<Availability>,
    #[serde(rename = "incompatibleWith")]
    pub incompatible_with: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<i32>,
}

impl Component {
    pub fn new_for_insert(dto: &ComponentDto) -> Self {
        let now = Utc::now();
        let mut component = Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            brand: dto.brand.clone().unwrap_or_default().trim().to_string(),
            model: dto.model.clone().unwrap_or_default().trim().to_string(),
            category_id: dto.category_id.clone(),
            description: dto.description.clone(),
            pricing: dto.pricing.clone().unwrap_or_default(),
            price: Money::zero(),
            technical_specs: dto.technical_specs.clone().unwrap_or_default(),
            availability: dto.availability.clone().unwrap_or_default(),
            ratings: Ratings::default(),
            incompatible_with: dto.incompatible_with.clone().unwrap_or_default(),
            tags: normalize_tags(dto.tags.clone().unwrap_or_default()),
            is_active: dto.is_active.unwrap_or(true),
            is_featured: dto.is_featured.unwrap_or(false),
            sort_order: dto.sort_order.unwrap_or(0),
            slug: None,
            created_at: now,
            updated_at: now,
        };
        component.before_write();
        component
    }

    pub fn apply(&mut self, dto: &ComponentDto) {
        self.name = dto.name.trim().to_string();
        if let Some(brand) = &dto.brand {
            self.brand = brand.trim().to_string();
        }
        if let Some(model) = &dto.model {
            self.model = model.trim().to_string();
        }
        if dto.category_id.is_some() {
            self.category_id = dto.category_id.clone();
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if let Some(pricing) = &dto.pricing {
            self.pricing = pricing.clone();
        }
        if let Some(specs) = &dto.technical_specs {
            self.technical_specs = specs.clone();
        }
        if let Some(availability) = &dto.availability {
            self.availability = availability.clone();
        }
        if let Some(incompatible) = &dto.incompatible_with {
            self.incompatible_with = incompatible.clone();
        }
        if let Some(tags) = &dto.tags {
            self.tags = normalize_tags(tags.clone());
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = dto.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(sort_order) = dto.sort_order {
            self.sort_order = sort_order;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Component name is required".into());
        }
        if self.pricing.cost.amount < 0.0
            || self.pricing.individual_price.amount < 0.0
            || self.pricing.build_price.amount < 0.0
        {
            return Err("Prices cannot be negative".into());
        }
        if self.availability.stock_count < 0 {
            return Err("Stock count cannot be negative".into());
        }
        Ok(())
    }

    /// Runs the derived-field recomputations. Must be called before
    /// every persist, not only on creation.
    pub fn before_write(&mut self) {
        self.regenerate_slug();
        self.sync_legacy_price();
        self.updated_at = Utc::now();
    }

    /// Invariant: `price.amount == pricing.individual_price.amount`.
    fn sync_legacy_price(&mut self) {
        self.price = self.pricing.individual_price.clone();
    }

    fn regenerate_slug(&mut self) {
        let text = format!("{} {} {}", self.brand, self.name, self.model);
        let slug = slugify(&text);
        self.slug = if slug.is_empty() { None } else { Some(slug) };
    }

    /// Price used when the component is sold inside a build; falls back
    /// to the stand-alone price when no build price is set.
    pub fn build_context_price(&self) -> f64 {
        if self.pricing.build_price.is_set() {
            self.pricing.build_price.amount
        } else {
            self.pricing.individual_price.amount
        }
    }

    pub fn display_name(&self) -> String {
        if self.brand.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.brand, self.name)
        }
    }

    pub fn availability_status(&self) -> AvailabilityStatus {
        self.availability.status()
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str) -> ComponentDto {
        ComponentDto {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn legacy_price_tracks_individual_price() {
        let mut d = dto("Ryzen 5 5600");
        d.pricing = Some(ComponentPricing {
            cost: Money::new(400.0),
            individual_price: Money::new(500.0),
            build_price: Money::new(470.0),
        });
        let mut component = Component::new_for_insert(&d);
        assert_eq!(component.price.amount, 500.0);
        assert_eq!(component.price.currency, "AED");

        component.pricing.individual_price = Money::new(450.0);
        component.before_write();
        assert_eq!(component.price.amount, 450.0);
    }

    #[test]
    fn slug_regenerated_from_brand_name_model() {
        let mut d = dto("Ryzen 7 5800X");
        d.brand = Some("AMD".into());
        d.model = Some("100-100000063WOF".into());
        let mut component = Component::new_for_insert(&d);
        assert_eq!(
            component.slug.as_deref(),
            Some("amd-ryzen-7-5800x-100-100000063wof")
        );

        component.brand = "Intel".into();
        component.before_write();
        assert!(component.slug.as_deref().unwrap().starts_with("intel-"));
    }

    #[test]
    fn availability_thresholds() {
        let mut availability = Availability {
            in_stock: true,
            stock_count: 0,
        };
        assert_eq!(availability.status(), AvailabilityStatus::OutOfStock);
        availability.stock_count = 4;
        assert_eq!(availability.status(), AvailabilityStatus::LowStock);
        availability.stock_count = 5;
        assert_eq!(availability.status(), AvailabilityStatus::InStock);
        availability.in_stock = false;
        assert_eq!(availability.status(), AvailabilityStatus::OutOfStock);
    }

    #[test]
    fn build_context_price_falls_back_to_individual() {
        let mut d = dto("Kingston Fury 16GB");
        d.pricing = Some(ComponentPricing {
            cost: Money::new(150.0),
            individual_price: Money::new(220.0),
            build_price: Money::zero(),
        });
        let component = Component::new_for_insert(&d);
        assert_eq!(component.build_context_price(), 220.0);
    }

    #[test]
    fn tags_are_lowercased_and_trimmed() {
        let mut d = dto("RTX 4070");
        d.tags = Some(vec![" Gaming ".into(), "NVIDIA".into(), "".into()]);
        let component = Component::new_for_insert(&d);
        assert_eq!(component.tags, vec!["gaming", "nvidia"]);
    }
}
