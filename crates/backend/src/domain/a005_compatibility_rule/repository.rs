use anyhow::Result;
use chrono::Utc;
use contracts::domain::a005_compatibility_rule::aggregate::CompatibilityRule;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_compatibility_rule")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub source_category_id: String,
    pub target_category_id: String,
    pub rules_json: String,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CompatibilityRule {
    fn from(m: Model) -> Self {
        CompatibilityRule {
            id: m.id,
            name: m.name,
            description: m.description,
            source_category_id: m.source_category_id,
            target_category_id: m.target_category_id,
            rules: serde_json::from_str(&m.rules_json).unwrap_or_default(),
            is_active: m.is_active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(rule: &CompatibilityRule) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(rule.id.clone()),
        name: Set(rule.name.clone()),
        description: Set(rule.description.clone()),
        source_category_id: Set(rule.source_category_id.clone()),
        target_category_id: Set(rule.target_category_id.clone()),
        rules_json: Set(serde_json::to_string(&rule.rules)?),
        is_active: Set(rule.is_active),
        created_at: Set(Some(rule.created_at)),
        updated_at: Set(Some(rule.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<CompatibilityRule>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

/// Active rules in creation order. Evaluation depends on this order.
pub async fn list_active() -> Result<Vec<CompatibilityRule>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn list_all() -> Result<Vec<CompatibilityRule>> {
    let db = get_connection()?;
    let models = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(rule: &CompatibilityRule) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(rule)?).exec(db).await?;
    Ok(())
}

pub async fn update(rule: &CompatibilityRule) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(rule)?).exec(db).await?;
    Ok(())
}
