//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use orderdesk_core::{ProductCategory, ProductId};

/// A catalog entry. Read-only in the web app; seeded via `od-cli seed`.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Catalog category.
    pub category: ProductCategory,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the product was added.
    pub created_at: DateTime<Utc>,
}
