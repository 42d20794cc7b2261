use std::collections::BTreeMap;

use chrono::Datelike;
use contracts::domain::a008_order::aggregate::{
    format_order_number, Order, OrderDto, OrderStatus, SupplierOffer,
};
use serde::Serialize;

use super::repository;
use crate::shared::data::sequence::next_order_sequence;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<Order>> {
    Ok(repository::list_all().await?)
}

pub async fn get(id: &str) -> AppResult<Order> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))
}

pub async fn create(dto: &OrderDto) -> AppResult<Order> {
    let product = crate::domain::a007_product::repository::get_by_id(&dto.product_id)
        .await?
        .ok_or_else(|| AppError::validation("Unknown product"))?;

    let supplier_name = match &dto.supplier_id {
        Some(supplier_id) => {
            let supplier = crate::domain::a006_supplier::repository::get_by_id(supplier_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown supplier"))?;
            Some(supplier.name)
        }
        None => None,
    };

    let offers = snapshot_offers(&dto.suppliers).await?;

    let year = chrono::Utc::now().year();
    let sequence = next_order_sequence(year).await?;
    let order_number = format_order_number(year, sequence);

    let mut dto = dto.clone();
    dto.suppliers = offers;
    if dto.supplier_name.is_none() {
        dto.supplier_name = supplier_name;
    }

    let order = Order::new_for_insert(&dto, order_number, product.name);
    order.validate().map_err(AppError::Validation)?;
    repository::insert(&order).await?;
    tracing::info!("Created order {}", order.order_number);
    Ok(order)
}

/// Offers naming suppliers that no longer exist are dropped silently;
/// the rest get fresh name/contact/email snapshots.
async fn snapshot_offers(offers: &[SupplierOffer]) -> AppResult<Vec<SupplierOffer>> {
    let mut snapshots = Vec::with_capacity(offers.len());
    for offer in offers {
        let supplier =
            match crate::domain::a006_supplier::repository::get_by_id(&offer.supplier_id).await? {
                Some(supplier) => supplier,
                None => continue,
            };
        snapshots.push(SupplierOffer {
            supplier_id: supplier.id,
            name: supplier.name,
            contact: Some(supplier.contact),
            email: supplier.email,
            price: offer.price,
            is_best_price: false,
        });
    }
    Ok(snapshots)
}

pub async fn update(id: &str, dto: &OrderDto) -> AppResult<Order> {
    let mut order = get(id).await?;
    if order.status.is_terminal() {
        return Err(AppError::validation(format!(
            "Order {} can no longer be edited",
            order.order_number
        )));
    }

    order.description = dto.description.trim().to_string();
    order.quantity = dto.quantity;
    if let Some(unit_price) = dto.unit_price {
        order.unit_price = unit_price;
    }
    if let Some(listed_price) = dto.listed_price {
        order.listed_price = listed_price;
    }
    if dto.supplier_id.is_some() {
        let supplier_id = dto.supplier_id.clone().filter(|s| !s.is_empty());
        order.supplier_name = match &supplier_id {
            Some(supplier_id) => {
                let supplier = crate::domain::a006_supplier::repository::get_by_id(supplier_id)
                    .await?
                    .ok_or_else(|| AppError::validation("Unknown supplier"))?;
                Some(supplier.name)
            }
            None => None,
        };
        order.supplier_id = supplier_id;
    }
    if !dto.suppliers.is_empty() {
        order.suppliers = snapshot_offers(&dto.suppliers).await?;
    }
    if dto.expected_delivery_date.is_some() {
        order.expected_delivery_date = dto.expected_delivery_date;
    }
    if dto.notes.is_some() {
        order.notes = dto.notes.clone();
    }

    order.validate().map_err(AppError::Validation)?;
    order.before_write();
    repository::update(&order).await?;
    Ok(order)
}

pub async fn update_status(id: &str, status: &str) -> AppResult<Order> {
    let next = OrderStatus::parse(status)
        .ok_or_else(|| AppError::validation(format!("Unknown order status '{}'", status)))?;

    let mut order = get(id).await?;
    order.transition_to(next).map_err(AppError::Validation)?;
    order.before_write();
    repository::update(&order).await?;
    tracing::info!("Order {} -> {}", order.order_number, next.as_str());
    Ok(order)
}

/// Delete is a cancellation; completed orders stay on record.
pub async fn cancel(id: &str) -> AppResult<Order> {
    update_status(id, OrderStatus::Cancelled.as_str()).await
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderAnalytics {
    #[serde(rename = "totalOrders")]
    pub total_orders: usize,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "byStatus")]
    pub by_status: BTreeMap<String, StatusBucket>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusBucket {
    pub count: usize,
    pub amount: f64,
}

pub async fn analytics() -> AppResult<OrderAnalytics> {
    let orders = repository::list_all().await?;
    let mut by_status: BTreeMap<String, StatusBucket> = OrderStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), StatusBucket::default()))
        .collect();

    let mut total_amount = 0.0;
    for order in &orders {
        total_amount += order.total_amount;
        if let Some(bucket) = by_status.get_mut(order.status.as_str()) {
            bucket.count += 1;
            bucket.amount += order.total_amount;
        }
    }

    Ok(OrderAnalytics {
        total_orders: orders.len(),
        total_amount,
        by_status,
    })
}

/// Current supplier offers for a product, cheapest first, minimum
/// price flagged (ties all flagged).
pub async fn product_offers(product_id: &str) -> AppResult<Vec<SupplierOffer>> {
    crate::domain::a007_product::service::get(product_id).await?;

    let suppliers = crate::domain::a006_supplier::repository::list_all().await?;
    let mut offers: Vec<SupplierOffer> = suppliers
        .into_iter()
        .filter_map(|supplier| {
            supplier.offer_for(product_id).map(|offer| SupplierOffer {
                supplier_id: supplier.id.clone(),
                name: supplier.name.clone(),
                contact: Some(supplier.contact.clone()),
                email: supplier.email.clone(),
                price: offer.price,
                is_best_price: false,
            })
        })
        .collect();

    let best = offers
        .iter()
        .map(|offer| offer.price)
        .fold(f64::INFINITY, f64::min);
    for offer in &mut offers {
        offer.is_best_price = offer.price == best;
    }
    offers.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));

    Ok(offers)
}
