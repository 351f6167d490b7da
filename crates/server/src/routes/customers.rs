//! Customer detail route handler (admin only).
//!
//! Shows one customer's profile and orders, with in-memory filtering over
//! the order list. A customer's order count is always the unfiltered total,
//! so narrowing the view never changes the headline figure.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use orderdesk_core::{CustomerId, OrderStatus};

use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Customer, OrderSummary};
use crate::state::AppState;

// =============================================================================
// Filter
// =============================================================================

/// Order filter from the customer-detail query string.
///
/// Empty strings (submitted by a blank form) count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    /// Exact status match.
    pub status: Option<String>,
    /// Case-insensitive substring match on the product name or note.
    pub q: Option<String>,
}

impl OrderFilter {
    /// Parsed status, treating blank and unknown values as no filter.
    fn parsed_status(&self) -> Option<OrderStatus> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }

    /// Non-empty search term, lowercased.
    fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether an order passes the filter.
    #[must_use]
    pub fn matches(&self, order: &OrderSummary) -> bool {
        if let Some(status) = self.parsed_status()
            && order.status != status
        {
            return false;
        }

        if let Some(term) = self.search_term() {
            let in_product = order.product_name.to_lowercase().contains(&term);
            let in_note = order
                .note
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&term));
            if !in_product && !in_note {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Template
// =============================================================================

/// Customer detail template.
#[derive(Template, WebTemplate)]
#[template(path = "customer.html")]
pub struct CustomerTemplate {
    pub customer: Customer,
    /// Unfiltered total, independent of the active filter.
    pub order_count: usize,
    pub orders: Vec<OrderSummary>,
    /// Echoed filter values so the form stays filled in.
    pub filter_status: String,
    pub filter_q: String,
}

// =============================================================================
// Route
// =============================================================================

/// Display a customer's profile and (optionally filtered) orders.
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Query(filter): Query<OrderFilter>,
) -> Result<Response> {
    let customer_id = CustomerId::new(id);

    let customer = CustomerRepository::new(state.pool())
        .get_by_id(customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    let all_orders = OrderRepository::new(state.pool())
        .list_for_customer(customer_id)
        .await?;

    let order_count = all_orders.len();
    let orders: Vec<OrderSummary> = all_orders
        .into_iter()
        .filter(|o| filter.matches(o))
        .collect();

    Ok(CustomerTemplate {
        customer,
        order_count,
        orders,
        filter_status: filter.status.unwrap_or_default(),
        filter_q: filter.q.unwrap_or_default(),
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orderdesk_core::OrderId;

    fn order(status: OrderStatus, product: &str, note: Option<&str>) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(1),
            customer_id: CustomerId::new(1),
            customer_name: "Alice".to_string(),
            product_name: product.to_string(),
            status,
            note: note.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn filter(status: Option<&str>, q: Option<&str>) -> OrderFilter {
        OrderFilter {
            status: status.map(str::to_string),
            q: q.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let f = OrderFilter::default();
        assert!(f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
        assert!(f.matches(&order(OrderStatus::Delivered, "Rake", Some("urgent"))));
    }

    #[test]
    fn test_blank_values_are_no_filter() {
        let f = filter(Some(""), Some("   "));
        assert!(f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
    }

    #[test]
    fn test_status_filter() {
        let f = filter(Some("pending"), None);
        assert!(f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
        assert!(!f.matches(&order(OrderStatus::Delivered, "Garden hose", None)));
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let f = filter(Some("not-a-status"), None);
        assert!(f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
    }

    #[test]
    fn test_search_matches_product_name_case_insensitive() {
        let f = filter(None, Some("HOSE"));
        assert!(f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
        assert!(!f.matches(&order(OrderStatus::Pending, "Rake", None)));
    }

    #[test]
    fn test_search_matches_note() {
        let f = filter(None, Some("urgent"));
        assert!(f.matches(&order(OrderStatus::Pending, "Rake", Some("Urgent delivery"))));
        assert!(!f.matches(&order(OrderStatus::Pending, "Rake", None)));
    }

    #[test]
    fn test_combined_filters_must_both_match() {
        let f = filter(Some("delivered"), Some("hose"));
        assert!(f.matches(&order(OrderStatus::Delivered, "Garden hose", None)));
        assert!(!f.matches(&order(OrderStatus::Pending, "Garden hose", None)));
        assert!(!f.matches(&order(OrderStatus::Delivered, "Rake", None)));
    }
}
