use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_category::aggregate::Category;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub fields_json: String,
    pub required: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        Category {
            id: m.id,
            name: m.name,
            description: m.description,
            color: m.color,
            icon: m.icon,
            fields: serde_json::from_str(&m.fields_json).unwrap_or_default(),
            required: m.required,
            sort_order: m.sort_order,
            is_active: m.is_active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(category: &Category) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(category.id.clone()),
        name: Set(category.name.clone()),
        description: Set(category.description.clone()),
        color: Set(category.color.clone()),
        icon: Set(category.icon.clone()),
        fields_json: Set(serde_json::to_string(&category.fields)?),
        required: Set(category.required),
        sort_order: Set(category.sort_order),
        is_active: Set(category.is_active),
        created_at: Set(Some(category.created_at)),
        updated_at: Set(Some(category.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<Category>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_all() -> Result<Vec<Category>> {
    let db = get_connection()?;
    let models = Entity::find()
        .order_by_asc(Column::SortOrder)
        .order_by_asc(Column::Name)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn get_by_name_ci(name: &str) -> Result<Option<Category>> {
    // Name uniqueness is case-insensitive
    let lowered = name.trim().to_lowercase();
    Ok(list_all()
        .await?
        .into_iter()
        .find(|c| c.name.to_lowercase() == lowered))
}

pub async fn insert(category: &Category) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(category)?).exec(db).await?;
    Ok(())
}

pub async fn update(category: &Category) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(category)?).exec(db).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection()?;
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
