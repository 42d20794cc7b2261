use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of a custom category field. Closed set; `Select` is the only
/// variant that carries options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Select,
    Boolean,
    Textarea,
    Url,
    Email,
}

/// Validation constraints attached to a single field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Definition of one custom field on a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Assigned server-side when omitted.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "fieldType")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validation: FieldValidation,
    /// Choices for `Select` fields; empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: i32,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl FieldDef {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Field name is required".into());
        }
        if self.field_type == FieldType::Select && self.options.is_empty() {
            return Err(format!("Select field '{}' must define options", self.name));
        }
        Ok(())
    }
}

/// Component category with its custom field schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Must this category be filled for a build to be complete.
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: i32,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl Category {
    pub fn new_for_insert(dto: &CategoryDto) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            description: dto.description.clone(),
            color: dto.color.clone(),
            icon: dto.icon.clone(),
            fields: dto.fields.clone().unwrap_or_default(),
            required: dto.required.unwrap_or(false),
            sort_order: dto.sort_order.unwrap_or(0),
            is_active: dto.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: &CategoryDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.clone();
        self.color = dto.color.clone();
        self.icon = dto.icon.clone();
        if let Some(fields) = &dto.fields {
            self.fields = fields.clone();
        }
        if let Some(required) = dto.required {
            self.required = required;
        }
        if let Some(sort_order) = dto.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name is required".into());
        }
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name.to_lowercase()) {
                return Err(format!("Duplicate field name '{}'", field.name));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Append a field, assigning the next sort position.
    pub fn add_field(&mut self, mut field: FieldDef) -> Result<(), String> {
        if field.id.is_empty() {
            field.id = Uuid::new_v4().to_string();
        }
        field.sort_order = self.fields.len() as i32;
        self.fields.push(field);
        self.validate()
    }

    pub fn update_field(&mut self, field_id: &str, updated: FieldDef) -> Result<(), String> {
        let slot = self
            .fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| format!("Field '{}' not found", field_id))?;
        let id = slot.id.clone();
        let sort_order = slot.sort_order;
        *slot = updated;
        slot.id = id;
        slot.sort_order = sort_order;
        self.validate()
    }

    pub fn remove_field(&mut self, field_id: &str) -> Result<(), String> {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != field_id);
        if self.fields.len() == before {
            return Err(format!("Field '{}' not found", field_id));
        }
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.sort_order = i as i32;
        }
        Ok(())
    }

    pub fn active_fields(&self) -> Vec<&FieldDef> {
        let mut fields: Vec<&FieldDef> = self.fields.iter().filter(|f| f.is_active).collect();
        fields.sort_by_key(|f| f.sort_order);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: FieldType) -> FieldDef {
        FieldDef {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            label: name.to_string(),
            field_type,
            required: false,
            validation: FieldValidation::default(),
            options: vec![],
            sort_order: 0,
            is_active: true,
        }
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let mut cat = Category::new_for_insert(&CategoryDto {
            name: "CPU".into(),
            ..Default::default()
        });
        cat.add_field(field("socket", FieldType::Text)).unwrap();
        let err = cat.add_field(field("Socket", FieldType::Text)).unwrap_err();
        assert!(err.contains("Duplicate field name"));
    }

    #[test]
    fn select_field_requires_options() {
        let cat_field = field("modular", FieldType::Select);
        assert!(cat_field.validate().is_err());
    }

    #[test]
    fn remove_field_renumbers_sort_order() {
        let mut cat = Category::new_for_insert(&CategoryDto {
            name: "PSU".into(),
            ..Default::default()
        });
        cat.add_field(field("wattage", FieldType::Number)).unwrap();
        cat.add_field(field("efficiency", FieldType::Text)).unwrap();
        let first_id = cat.fields[0].id.clone();
        cat.remove_field(&first_id).unwrap();
        assert_eq!(cat.fields.len(), 1);
        assert_eq!(cat.fields[0].sort_order, 0);
    }

    #[test]
    fn field_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FieldType::Textarea).unwrap(),
            "\"textarea\""
        );
    }
}
