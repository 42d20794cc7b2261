use anyhow::Result;
use chrono::Utc;
use contracts::domain::a006_supplier::aggregate::Supplier;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_supplier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub location: Option<String>,
    pub address: String,
    pub products_json: String,
    pub comments_json: String,
    pub ratings_json: String,
    pub average_rating: f64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Supplier {
    fn from(m: Model) -> Self {
        Supplier {
            id: m.id,
            name: m.name,
            contact: m.contact,
            email: m.email,
            phone: m.phone,
            website: m.website,
            location: m.location,
            address: m.address,
            products: serde_json::from_str(&m.products_json).unwrap_or_default(),
            comments: serde_json::from_str(&m.comments_json).unwrap_or_default(),
            ratings: serde_json::from_str(&m.ratings_json).unwrap_or_default(),
            average_rating: m.average_rating,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(supplier: &Supplier) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(supplier.id.clone()),
        name: Set(supplier.name.clone()),
        contact: Set(supplier.contact.clone()),
        email: Set(supplier.email.clone()),
        phone: Set(supplier.phone.clone()),
        website: Set(supplier.website.clone()),
        location: Set(supplier.location.clone()),
        address: Set(supplier.address.clone()),
        products_json: Set(serde_json::to_string(&supplier.products)?),
        comments_json: Set(serde_json::to_string(&supplier.comments)?),
        ratings_json: Set(serde_json::to_string(&supplier.ratings)?),
        average_rating: Set(supplier.average_rating),
        created_at: Set(Some(supplier.created_at)),
        updated_at: Set(Some(supplier.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<Supplier>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_all() -> Result<Vec<Supplier>> {
    let db = get_connection()?;
    let models = Entity::find().order_by_asc(Column::Name).all(db).await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(supplier: &Supplier) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(supplier)?).exec(db).await?;
    Ok(())
}

pub async fn update(supplier: &Supplier) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(supplier)?).exec(db).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection()?;
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
