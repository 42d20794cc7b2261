use anyhow::Result;
use chrono::Utc;
use contracts::domain::a003_prebuild_pc::aggregate::{
    BuildAvailability, PreBuildPc, PrebuildPricing,
};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_prebuild_pc")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub components_json: String,
    pub components_cost: f64,
    pub assembly_fee: f64,
    pub total_cost: f64,
    pub selling_price: f64,
    pub currency: String,
    pub in_stock: bool,
    pub stock_count: i32,
    pub estimated_build_time: String,
    pub tags_json: String,
    pub slug: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PreBuildPc {
    fn from(m: Model) -> Self {
        PreBuildPc {
            id: m.id,
            name: m.name,
            category: m.category,
            description: m.description,
            components: serde_json::from_str(&m.components_json).unwrap_or_default(),
            pricing: PrebuildPricing {
                components_cost: m.components_cost,
                assembly_fee: m.assembly_fee,
                total_cost: m.total_cost,
                selling_price: m.selling_price,
                currency: m.currency,
            },
            availability: BuildAvailability {
                in_stock: m.in_stock,
                stock_count: m.stock_count,
                estimated_build_time: m.estimated_build_time,
            },
            tags: serde_json::from_str(&m.tags_json).unwrap_or_default(),
            is_active: m.is_active,
            is_featured: m.is_featured,
            sort_order: m.sort_order,
            slug: m.slug,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(pc: &PreBuildPc) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(pc.id.clone()),
        name: Set(pc.name.clone()),
        description: Set(pc.description.clone()),
        category: Set(pc.category.clone()),
        components_json: Set(serde_json::to_string(&pc.components)?),
        components_cost: Set(pc.pricing.components_cost),
        assembly_fee: Set(pc.pricing.assembly_fee),
        total_cost: Set(pc.pricing.total_cost),
        selling_price: Set(pc.pricing.selling_price),
        currency: Set(pc.pricing.currency.clone()),
        in_stock: Set(pc.availability.in_stock),
        stock_count: Set(pc.availability.stock_count),
        estimated_build_time: Set(pc.availability.estimated_build_time.clone()),
        tags_json: Set(serde_json::to_string(&pc.tags)?),
        slug: Set(pc.slug.clone()),
        is_featured: Set(pc.is_featured),
        is_active: Set(pc.is_active),
        sort_order: Set(pc.sort_order),
        created_at: Set(Some(pc.created_at)),
        updated_at: Set(Some(pc.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<PreBuildPc>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_active() -> Result<Vec<PreBuildPc>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::IsActive.eq(true))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

/// How many active pre-built PCs reference the component in any slot.
pub async fn count_referencing_component(component_id: &str) -> Result<usize> {
    let builds = list_active().await?;
    Ok(builds
        .iter()
        .filter(|pc| {
            pc.components
                .values()
                .any(|slot| slot.component_id == component_id)
        })
        .count())
}

pub async fn insert(pc: &PreBuildPc) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(pc)?).exec(db).await?;
    Ok(())
}

pub async fn update(pc: &PreBuildPc) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(pc)?).exec(db).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection()?;
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
