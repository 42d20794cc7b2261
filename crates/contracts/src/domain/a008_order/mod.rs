pub mod aggregate;

pub use aggregate::{format_order_number, Order, OrderDto, OrderStatus, SupplierOffer};
