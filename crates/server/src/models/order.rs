//! Order domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use orderdesk_core::{CustomerId, OrderId, OrderStatus, ProductId};

/// An order, referencing exactly one customer and one product.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Delivery status.
    pub status: OrderStatus,
    /// Optional free-form note.
    pub note: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// An order joined with its customer and product names, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct OrderSummary {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Owning customer's display name.
    pub customer_name: String,
    /// Ordered product's name.
    pub product_name: String,
    /// Delivery status.
    pub status: OrderStatus,
    /// Optional free-form note.
    pub note: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an order (batch creation validates rows into these).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Ordered product.
    pub product_id: ProductId,
    /// Initial delivery status.
    pub status: OrderStatus,
    /// Optional free-form note.
    pub note: Option<String>,
}
