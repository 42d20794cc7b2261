use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of build purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildType {
    Gaming,
    Office,
    Workstation,
    Budget,
    HighEnd,
    Custom,
}

impl Default for BuildType {
    fn default() -> Self {
        BuildType::Custom
    }
}

/// One selection in a user build: a component under a declared category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "componentId")]
    pub component_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Custom build assembled by a user from catalog components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBuild {
    pub id: String,
    pub name: String,
    /// Owner; anonymous builds are allowed.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub components: Vec<BuildEntry>,
    /// Derived: recomputed whenever entries change.
    #[serde(rename = "totalPrice", default)]
    pub total_price: f64,
    #[serde(rename = "buildType", default)]
    pub build_type: BuildType,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBuildDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub components: Vec<BuildEntry>,
    #[serde(rename = "buildType")]
    pub build_type: Option<BuildType>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl UserBuild {
    pub fn new_for_insert(dto: &UserBuildDto) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            user_id: dto.user_id.clone(),
            components: dto.components.clone(),
            total_price: 0.0,
            build_type: dto.build_type.unwrap_or_default(),
            is_public: dto.is_public.unwrap_or(false),
            tags: dto.tags.clone().unwrap_or_default(),
            notes: dto.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: &UserBuildDto) {
        self.name = dto.name.trim().to_string();
        if dto.user_id.is_some() {
            self.user_id = dto.user_id.clone();
        }
        self.components = dto.components.clone();
        if let Some(build_type) = dto.build_type {
            self.build_type = build_type;
        }
        if let Some(is_public) = dto.is_public {
            self.is_public = is_public;
        }
        if let Some(tags) = &dto.tags {
            self.tags = tags.clone();
        }
        if dto.notes.is_some() {
            self.notes = dto.notes.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Build name is required".into());
        }
        for entry in &self.components {
            if entry.quantity == 0 {
                return Err("Entry quantity must be at least 1".into());
            }
        }
        Ok(())
    }

    /// Recompute total from per-entry unit prices (component id -> unit
    /// price in build context). Entries whose component is missing from
    /// the map contribute 0.
    pub fn recompute_total(&mut self, unit_prices: &std::collections::HashMap<String, f64>) {
        self.total_price = self
            .components
            .iter()
            .map(|entry| {
                unit_prices.get(&entry.component_id).copied().unwrap_or(0.0)
                    * f64::from(entry.quantity)
            })
            .sum();
    }

    pub fn before_write(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn total_price_multiplies_by_quantity() {
        let mut build = UserBuild::new_for_insert(&UserBuildDto {
            name: "Dual RAM rig".into(),
            components: vec![
                BuildEntry {
                    category_id: "cat-ram".into(),
                    component_id: "ram-1".into(),
                    quantity: 2,
                },
                BuildEntry {
                    category_id: "cat-cpu".into(),
                    component_id: "cpu-1".into(),
                    quantity: 1,
                },
            ],
            ..Default::default()
        });
        let mut prices = HashMap::new();
        prices.insert("ram-1".to_string(), 220.0);
        prices.insert("cpu-1".to_string(), 900.0);
        build.recompute_total(&prices);
        assert_eq!(build.total_price, 1340.0);
    }

    #[test]
    fn unknown_components_contribute_zero() {
        let mut build = UserBuild::new_for_insert(&UserBuildDto {
            name: "Sparse".into(),
            components: vec![BuildEntry {
                category_id: "cat".into(),
                component_id: "ghost".into(),
                quantity: 3,
            }],
            ..Default::default()
        });
        build.recompute_total(&HashMap::new());
        assert_eq!(build.total_price, 0.0);
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let build = UserBuild::new_for_insert(&UserBuildDto {
            name: "Broken".into(),
            components: vec![BuildEntry {
                category_id: "cat".into(),
                component_id: "cpu".into(),
                quantity: 0,
            }],
            ..Default::default()
        });
        assert!(build.validate().is_err());
    }

    #[test]
    fn build_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&BuildType::HighEnd).unwrap(),
            "\"high-end\""
        );
    }
}
