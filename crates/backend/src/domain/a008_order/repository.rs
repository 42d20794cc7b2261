use anyhow::Result;
use chrono::Utc;
use contracts::domain::a008_order::aggregate::{Order, OrderStatus};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub order_number: String,
    pub description: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub listed_price: f64,
    pub total_amount: f64,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub suppliers_json: String,
    pub status: String,
    pub order_date: Option<chrono::DateTime<chrono::Utc>>,
    pub expected_delivery_date: Option<chrono::DateTime<chrono::Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        Order {
            id: m.id,
            order_number: m.order_number,
            description: m.description,
            product_id: m.product_id,
            product_name: m.product_name,
            quantity: m.quantity.max(0) as u32,
            unit_price: m.unit_price,
            listed_price: m.listed_price,
            supplier_id: m.supplier_id,
            supplier_name: m.supplier_name,
            suppliers: serde_json::from_str(&m.suppliers_json).unwrap_or_default(),
            total_amount: m.total_amount,
            status: OrderStatus::parse(&m.status).unwrap_or_default(),
            order_date: m.order_date.unwrap_or_else(Utc::now),
            expected_delivery_date: m.expected_delivery_date,
            notes: m.notes,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(order: &Order) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(order.id.clone()),
        order_number: Set(order.order_number.clone()),
        description: Set(order.description.clone()),
        product_id: Set(order.product_id.clone()),
        product_name: Set(order.product_name.clone()),
        quantity: Set(order.quantity as i32),
        unit_price: Set(order.unit_price),
        listed_price: Set(order.listed_price),
        total_amount: Set(order.total_amount),
        supplier_id: Set(order.supplier_id.clone()),
        supplier_name: Set(order.supplier_name.clone()),
        suppliers_json: Set(serde_json::to_string(&order.suppliers)?),
        status: Set(order.status.as_str().to_string()),
        order_date: Set(Some(order.order_date)),
        expected_delivery_date: Set(order.expected_delivery_date),
        notes: Set(order.notes.clone()),
        created_at: Set(Some(order.created_at)),
        updated_at: Set(Some(order.updated_at)),
    })
}

pub async fn get_by_id(id: &str) -> Result<Option<Order>> {
    let db = get_connection()?;
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn list_all() -> Result<Vec<Order>> {
    let db = get_connection()?;
    let models = Entity::find()
        .order_by_desc(Column::OrderDate)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(order: &Order) -> Result<()> {
    let db = get_connection()?;
    Entity::insert(to_active_model(order)?).exec(db).await?;
    Ok(())
}

pub async fn update(order: &Order) -> Result<()> {
    let db = get_connection()?;
    Entity::update(to_active_model(order)?).exec(db).await?;
    Ok(())
}
