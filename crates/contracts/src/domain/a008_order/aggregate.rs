use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle. Pending -> Processing -> Completed, Cancelled
/// reachable from any non-terminal state; Completed and Cancelled are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Same-status transitions are allowed (idempotent update).
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        match self {
            OrderStatus::Pending => {
                matches!(next, OrderStatus::Processing | OrderStatus::Cancelled)
            }
            OrderStatus::Processing => {
                matches!(next, OrderStatus::Completed | OrderStatus::Cancelled)
            }
            OrderStatus::Completed | OrderStatus::Cancelled => false,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Alternate supplier offer snapshot embedded in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOffer {
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub price: f64,
    #[serde(rename = "isBestPrice", default)]
    pub is_best_price: bool,
}

/// Procurement order for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// `ORD-<year>-<NNN>`, assigned once at creation.
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    pub description: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub quantity: u32,
    #[serde(rename = "unitPrice", default)]
    pub unit_price: f64,
    #[serde(rename = "listedPrice", default)]
    pub listed_price: f64,
    #[serde(rename = "supplierId", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(rename = "supplierName", skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub suppliers: Vec<SupplierOffer>,
    /// Derived: quantity x unit_price.
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "orderDate")]
    pub order_date: DateTime<Utc>,
    #[serde(
        rename = "expectedDeliveryDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Option<String>,
    pub description: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    pub quantity: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: Option<f64>,
    #[serde(rename = "listedPrice")]
    pub listed_price: Option<f64>,
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,
    #[serde(rename = "supplierName")]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub suppliers: Vec<SupplierOffer>,
    #[serde(rename = "expectedDeliveryDate")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// `ORD-2025-001` style order number.
pub fn format_order_number(year: i32, sequence: i64) -> String {
    format!("ORD-{}-{:03}", year, sequence)
}

impl Order {
    /// `order_number` comes from the per-year sequence; the caller owns
    /// that allocation.
    pub fn new_for_insert(dto: &OrderDto, order_number: String, product_name: String) -> Self {
        let now = Utc::now();
        let mut order = Self {
            id: Uuid::new_v4().to_string(),
            order_number,
            description: dto.description.trim().to_string(),
            product_id: dto.product_id.clone(),
            product_name,
            quantity: dto.quantity,
            unit_price: dto.unit_price.unwrap_or(0.0),
            listed_price: dto.listed_price.unwrap_or(0.0),
            supplier_id: dto.supplier_id.clone(),
            supplier_name: dto.supplier_name.clone(),
            suppliers: dto.suppliers.clone(),
            total_amount: 0.0,
            status: OrderStatus::Pending,
            order_date: now,
            expected_delivery_date: dto.expected_delivery_date,
            notes: dto.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        order.before_write();
        order
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Order description is required".into());
        }
        if self.product_id.is_empty() {
            return Err("Order product is required".into());
        }
        if self.quantity == 0 {
            return Err("Quantity must be at least 1".into());
        }
        if self.unit_price < 0.0 || self.listed_price < 0.0 {
            return Err("Prices cannot be negative".into());
        }
        for offer in &self.suppliers {
            if offer.price < 0.0 {
                return Err("Supplier offer price cannot be negative".into());
            }
        }
        Ok(())
    }

    /// Exactly the minimum-price offer(s) get the flag; ties all win.
    /// Empty offer list leaves nothing flagged.
    pub fn update_best_price_indicators(&mut self) {
        let best = self
            .suppliers
            .iter()
            .map(|offer| offer.price)
            .fold(f64::INFINITY, f64::min);
        for offer in &mut self.suppliers {
            offer.is_best_price = offer.price == best;
        }
    }

    /// Derived-field recomputation before every persist.
    pub fn before_write(&mut self) {
        self.total_amount = f64::from(self.quantity) * self.unit_price;
        self.update_best_price_indicators();
        self.updated_at = Utc::now();
    }

    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "Cannot change order status from {} to {}",
                self.status.as_str(),
                next.as_str()
            ));
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_offers(prices: &[f64]) -> Order {
        let dto = OrderDto {
            description: "GPUs restock".into(),
            product_id: "prod-1".into(),
            quantity: 2,
            unit_price: Some(100.0),
            suppliers: prices
                .iter()
                .enumerate()
                .map(|(i, price)| SupplierOffer {
                    supplier_id: format!("sup-{i}"),
                    name: format!("Supplier {i}"),
                    contact: None,
                    email: None,
                    price: *price,
                    is_best_price: false,
                })
                .collect(),
            ..Default::default()
        };
        Order::new_for_insert(&dto, "ORD-2025-001".into(), "RTX 4070".into())
    }

    #[test]
    fn best_price_ties_all_flagged() {
        let order = order_with_offers(&[100.0, 80.0, 80.0]);
        let flags: Vec<bool> = order.suppliers.iter().map(|o| o.is_best_price).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn empty_offer_list_flags_nothing() {
        let order = order_with_offers(&[]);
        assert!(order.suppliers.is_empty());
    }

    #[test]
    fn total_amount_is_quantity_times_unit_price() {
        let mut order = order_with_offers(&[50.0]);
        assert_eq!(order.total_amount, 200.0);
        order.quantity = 5;
        order.unit_price = 30.0;
        order.before_write();
        assert_eq!(order.total_amount, 150.0);
    }

    #[test]
    fn status_machine_allows_forward_path() {
        let mut order = order_with_offers(&[]);
        assert!(order.transition_to(OrderStatus::Processing).is_ok());
        assert!(order.transition_to(OrderStatus::Completed).is_ok());
        assert!(order.transition_to(OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn cancel_allowed_from_non_terminal_only() {
        let mut order = order_with_offers(&[]);
        assert!(order.transition_to(OrderStatus::Cancelled).is_ok());
        assert!(order.transition_to(OrderStatus::Processing).is_err());
    }

    #[test]
    fn pending_cannot_jump_to_completed() {
        let mut order = order_with_offers(&[]);
        assert!(order.transition_to(OrderStatus::Completed).is_err());
    }

    #[test]
    fn order_number_format() {
        assert_eq!(format_order_number(2025, 1), "ORD-2025-001");
        assert_eq!(format_order_number(2025, 42), "ORD-2025-042");
        assert_eq!(format_order_number(2025, 1234), "ORD-2025-1234");
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert_eq!(OrderStatus::parse("Pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("Shipped"), None);
    }
}
