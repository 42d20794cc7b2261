use anyhow::Result;
use chrono::Utc;
use contracts::domain::a007_product::aggregate::Product;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: m.id,
            name: m.name,
            description: m.description,
            base_price: m.base_price,
            is_active: m.is_active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(product: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(product.id.clone()),
        name: Set(product.name.clone()),
        description: Set(product.description.clone()),
        base_price: Set(product.base_price),
        is_active: Set(product.is_active),
        created_at: Set(Some(product.created_at)),
        updated_at: Set(Some(product.updated_at)),
    }
}

pub async fn get_by_id(id: &str) -> Result<Option<Product>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_active() -> Result<Vec<Product>> {
    let db = get_connection()?;
    let models = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Name)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(product: &Product) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(product)).exec(db).await?;
    Ok(())
}

pub async fn update(product: &Product) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(product)).exec(db).await?;
    Ok(())
}
