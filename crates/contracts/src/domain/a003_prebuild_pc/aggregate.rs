use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::slugify;

/// The 8 fixed component slots of a pre-built PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Storage,
    Psu,
    Case,
    Cooling,
}

pub const SLOT_KEYS: [SlotKey; 8] = [
    SlotKey::Cpu,
    SlotKey::Gpu,
    SlotKey::Motherboard,
    SlotKey::Ram,
    SlotKey::Storage,
    SlotKey::Psu,
    SlotKey::Case,
    SlotKey::Cooling,
];

impl SlotKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Cpu => "cpu",
            SlotKey::Gpu => "gpu",
            SlotKey::Motherboard => "motherboard",
            SlotKey::Ram => "ram",
            SlotKey::Storage => "storage",
            SlotKey::Psu => "psu",
            SlotKey::Case => "case",
            SlotKey::Cooling => "cooling",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        SLOT_KEYS.iter().copied().find(|k| k.as_str() == s)
    }
}

/// Weak component reference plus the snapshot captured at assembly time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRef {
    #[serde(rename = "componentId")]
    pub component_id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrebuildPricing {
    /// Sum of all filled slots' snapshot prices. Derived.
    #[serde(rename = "componentsCost", default)]
    pub components_cost: f64,
    #[serde(rename = "assemblyFee", default)]
    pub assembly_fee: f64,
    /// components_cost + assembly_fee. Derived.
    #[serde(rename = "totalCost", default)]
    pub total_cost: f64,
    /// Independently set, not derived.
    #[serde(rename = "sellingPrice", default)]
    pub selling_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    crate::domain::common::DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildAvailability {
    #[serde(rename = "inStock", default = "default_true")]
    pub in_stock: bool,
    #[serde(rename = "stockCount", default)]
    pub stock_count: i32,
    #[serde(rename = "estimatedBuildTime", default = "default_build_time")]
    pub estimated_build_time: String,
}

fn default_true() -> bool {
    true
}

fn default_build_time() -> String {
    "3-5 business days".to_string()
}

impl Default for BuildAvailability {
    fn default() -> Self {
        Self {
            in_stock: true,
            stock_count: 0,
            estimated_build_time: default_build_time(),
        }
    }
}

impl BuildAvailability {
    pub fn status(&self) -> &'static str {
        if !self.in_stock {
            "Out of Stock"
        } else if self.stock_count == 0 {
            "Build to Order"
        } else if self.stock_count < 3 {
            "Limited Stock"
        } else {
            "In Stock"
        }
    }
}

/// Pre-assembled PC offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreBuildPc {
    pub id: String,
    pub name: String,
    /// Marketing line, not a catalog category reference.
    #[serde(default = "default_line")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub components: std::collections::BTreeMap<String, SlotRef>,
    #[serde(default)]
    pub pricing: PrebuildPricing,
    #[serde(default)]
    pub availability: BuildAvailability,
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

fn default_line() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreBuildPcDto {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Slot key -> component id; snapshots are taken server-side.
    #[serde(default)]
    pub components: Option<std::collections::BTreeMap<String, String>>,
    #[serde(rename = "assemblyFee")]
    pub assembly_fee: Option<f64>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Option<f64>,
    pub availability: Option<BuildAvailability>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<i32>,
}

impl PreBuildPc {
    pub fn new_for_insert(dto: &PreBuildPcDto) -> Self {
        let now = Utc::now();
        let mut pc = Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            category: dto.category.clone().unwrap_or_else(default_line),
            description: dto.description.clone(),
            components: Default::default(),
            pricing: PrebuildPricing {
                assembly_fee: dto.assembly_fee.unwrap_or(0.0),
                selling_price: dto.selling_price.unwrap_or(0.0),
                ..Default::default()
            },
            availability: dto.availability.clone().unwrap_or_default(),
            tags: dto.tags.clone().unwrap_or_default(),
            is_active: dto.is_active.unwrap_or(true),
            is_featured: dto.is_featured.unwrap_or(false),
            sort_order: dto.sort_order.unwrap_or(0),
            slug: None,
            created_at: now,
            updated_at: now,
        };
        pc.before_write();
        pc
    }

    pub fn apply(&mut self, dto: &PreBuildPcDto) {
        self.name = dto.name.trim().to_string();
        if let Some(category) = &dto.category {
            self.category = category.clone();
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if let Some(fee) = dto.assembly_fee {
            self.pricing.assembly_fee = fee;
        }
        if let Some(price) = dto.selling_price {
            self.pricing.selling_price = price;
        }
        if let Some(availability) = &dto.availability {
            self.availability = availability.clone();
        }
        if let Some(tags) = &dto.tags {
            self.tags = tags.clone();
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
            return Err("Pre-built PC name is required".into());
        }
        if self.pricing.selling_price < 0.0 {
            return Err("Selling price cannot be negative".into());
        }
        for key in self.components.keys() {
            if SlotKey::parse(key).is_none() {
                return Err(format!("Unknown component slot '{}'", key));
            }
        }
        Ok(())
    }

    pub fn set_slot(&mut self, slot: SlotKey, snapshot: Option<SlotRef>) {
        match snapshot {
            Some(snapshot) => {
                self.components.insert(slot.as_str().to_string(), snapshot);
            }
            None => {
                self.components.remove(slot.as_str());
            }
        }
    }

    /// Recompute the derived pricing fields. Pure function of current
    /// state; must run before every persist so edits to the assembly
    /// fee or slot contents stay consistent. Missing slots contribute 0.
    pub fn recompute_pricing(&mut self) {
        let components_cost: f64 = self.components.values().map(|slot| slot.price).sum();
        self.pricing.components_cost = components_cost;
        self.pricing.total_cost = components_cost + self.pricing.assembly_fee;
    }

    pub fn before_write(&mut self) {
        self.recompute_pricing();
        let slug = slugify(&format!("{} {}", self.name, self.category));
        self.slug = if slug.is_empty() { None } else { Some(slug) };
        self.updated_at = Utc::now();
    }

    /// Number of filled slots (0-8).
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(name: &str) -> PreBuildPc {
        PreBuildPc::new_for_insert(&PreBuildPcDto {
            name: name.to_string(),
            selling_price: Some(1.0),
            ..Default::default()
        })
    }

    fn slot(id: &str, name: &str, price: f64) -> SlotRef {
        SlotRef {
            component_id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn components_cost_is_sum_of_filled_slots() {
        let mut build = pc("Starter Gaming");
        build.set_slot(SlotKey::Cpu, Some(slot("c1", "Ryzen 5", 300.0)));
        build.set_slot(SlotKey::Gpu, Some(slot("g1", "RTX 4060", 700.0)));
        build.pricing.assembly_fee = 50.0;
        build.before_write();

        assert_eq!(build.pricing.components_cost, 1000.0);
        assert_eq!(build.pricing.total_cost, 1050.0);
        assert_eq!(build.component_count(), 2);
    }

    #[test]
    fn clearing_a_slot_recomputes_cost() {
        let mut build = pc("Creator");
        build.set_slot(SlotKey::Cpu, Some(slot("c1", "i7", 900.0)));
        build.set_slot(SlotKey::Ram, Some(slot("r1", "32GB", 400.0)));
        build.before_write();
        assert_eq!(build.pricing.components_cost, 1300.0);

        build.set_slot(SlotKey::Ram, None);
        build.before_write();
        assert_eq!(build.pricing.components_cost, 900.0);
        assert_eq!(build.pricing.total_cost, 900.0);
    }

    #[test]
    fn selling_price_is_not_derived() {
        let mut build = pc("Budget Box");
        build.pricing.selling_price = 2500.0;
        build.set_slot(SlotKey::Cpu, Some(slot("c1", "i3", 300.0)));
        build.before_write();
        assert_eq!(build.pricing.selling_price, 2500.0);
    }

    #[test]
    fn rejects_unknown_slot_key() {
        let mut build = pc("Bad Slots");
        build
            .components
            .insert("soundcard".into(), slot("s1", "X-Fi", 100.0));
        assert!(build.validate().is_err());
    }

    #[test]
    fn availability_status_thresholds() {
        let mut availability = BuildAvailability::default();
        assert_eq!(availability.status(), "Build to Order");
        availability.stock_count = 2;
        assert_eq!(availability.status(), "Limited Stock");
        availability.stock_count = 3;
        assert_eq!(availability.status(), "In Stock");
        availability.in_stock = false;
        assert_eq!(availability.status(), "Out of Stock");
    }
}
