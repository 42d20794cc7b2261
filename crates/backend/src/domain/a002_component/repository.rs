use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_component::aggregate::{Availability, Component, Ratings};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_component")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub price_amount: f64,
    pub price_currency: String,
    pub pricing_json: String,
    pub technical_specs_json: String,
    pub in_stock: bool,
    pub stock_count: i32,
    pub rating_average: f64,
    pub rating_count: i32,
    pub incompatible_json: String,
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

impl From<Model> for Component {
    fn from(m: Model) -> Self {
        Component {
            id: m.id,
            name: m.name,
            brand: m.brand,
            model: m.model,
            category_id: m.category_id,
            description: m.description,
            pricing: serde_json::from_str(&m.pricing_json).unwrap_or_default(),
            price: contracts::domain::common::Money {
                amount: m.price_amount,
                currency: m.price_currency,
            },
            technical_specs: serde_json::from_str(&m.technical_specs_json).unwrap_or_default(),
            availability: Availability {
                in_stock: m.in_stock,
                stock_count: m.stock_count,
            },
            ratings: Ratings {
                average: m.rating_average,
                count: m.rating_count,
            },
            incompatible_with: serde_json::from_str(&m.incompatible_json).unwrap_or_default(),
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

fn to_active_model(component: &Component) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(component.id.clone()),
        name: Set(component.name.clone()),
        brand: Set(component.brand.clone()),
        model: Set(component.model.clone()),
        description: Set(component.description.clone()),
        category_id: Set(component.category_id.clone()),
        price_amount: Set(component.price.amount),
        price_currency: Set(component.price.currency.clone()),
        pricing_json: Set(serde_json::to_string(&component.pricing)?),
        technical_specs_json: Set(serde_json::to_string(&component.technical_specs)?),
        in_stock: Set(component.availability.in_stock),
        stock_count: Set(component.availability.stock_count),
        rating_average: Set(component.ratings.average),
        rating_count: Set(component.ratings.count),
        incompatible_json: Set(serde_json::to_string(&component.incompatible_with)?),
        tags_json: Set(serde_json::to_string(&component.tags)?),
        slug: Set(component.slug.clone()),
        is_featured: Set(component.is_featured),
        is_active: Set(component.is_active),
        sort_order: Set(component.sort_order),
        created_at: Set(Some(component.created_at)),
        updated_at: Set(Some(component.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<Component>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_active() -> Result<Vec<Component>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::IsActive.eq(true))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

/// In-stock components of one category, for build pickers.
pub async fn list_in_stock_by_category(category_id: &str) -> Result<Vec<Component>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::IsActive.eq(true))
        .filter(Column::CategoryId.eq(category_id))
        .filter(Column::InStock.eq(true))
        .filter(Column::StockCount.gt(0))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(component: &Component) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(component)?).exec(db).await?;
    Ok(())
}

pub async fn update(component: &Component) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(component)?).exec(db).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection()?;
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
