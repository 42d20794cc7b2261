use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Procurement product referenced by orders and supplier offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "basePrice", default)]
    pub base_price: f64,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "basePrice")]
    pub base_price: Option<f64>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl Product {
    pub fn new_for_insert(dto: &ProductDto) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            description: dto.description.clone(),
            base_price: dto.base_price.unwrap_or(0.0),
            is_active: dto.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: &ProductDto) {
        self.name = dto.name.trim().to_string();
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if let Some(base_price) = dto.base_price {
            self.base_price = base_price;
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name is required".into());
        }
        if self.base_price < 0.0 {
            return Err("Base price cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.updated_at = Utc::now();
    }
}
