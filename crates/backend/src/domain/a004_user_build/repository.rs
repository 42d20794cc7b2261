use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_user_build::aggregate::{BuildType, UserBuild};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_user_build")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub user_id: Option<String>,
    pub build_type: String,
    pub components_json: String,
    pub total_price: f64,
    pub is_public: bool,
    pub tags_json: String,
    pub notes: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_build_type(raw: &str) -> BuildType {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap_or_default()
}

fn build_type_str(build_type: BuildType) -> String {
    match serde_json::to_value(build_type) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "custom".to_string(),
    }
}

impl From<Model> for UserBuild {
    fn from(m: Model) -> Self {
        UserBuild {
            id: m.id,
            name: m.name,
            user_id: m.user_id,
            components: serde_json::from_str(&m.components_json).unwrap_or_default(),
            total_price: m.total_price,
            build_type: parse_build_type(&m.build_type),
            is_public: m.is_public,
            tags: serde_json::from_str(&m.tags_json).unwrap_or_default(),
            notes: m.notes,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(build: &UserBuild) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(build.id.clone()),
        name: Set(build.name.clone()),
        user_id: Set(build.user_id.clone()),
        build_type: Set(build_type_str(build.build_type)),
        components_json: Set(serde_json::to_string(&build.components)?),
        total_price: Set(build.total_price),
        is_public: Set(build.is_public),
        tags_json: Set(serde_json::to_string(&build.tags)?),
        notes: Set(build.notes.clone()),
        created_at: Set(Some(build.created_at)),
        updated_at: Set(Some(build.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<UserBuild>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_all() -> Result<Vec<UserBuild>> {
    let db = get_connection()?;
    let models = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn list_by_user(user_id: &str) -> Result<Vec<UserBuild>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

/// How many user builds contain the component.
pub async fn count_referencing_component(component_id: &str) -> Result<usize> {
    let builds = list_all().await?;
    Ok(builds
        .iter()
        .filter(|b| b.components.iter().any(|e| e.component_id == component_id))
        .count())
}

pub async fn insert(build: &UserBuild) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(build)?).exec(db).await?;
    Ok(())
}

pub async fn update(build: &UserBuild) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(build)?).exec(db).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection()?;
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
