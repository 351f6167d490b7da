//! Dashboard route handlers.
//!
//! The root page is role-dispatched: admins see the full dashboard, while
//! customers are sent to their own scoped dashboard at `/user`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use orderdesk_core::{OrderStatus, Role};

use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireCustomer};
use crate::models::{Customer, OrderSummary};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub total_customers: i64,
    pub total_orders: i64,
    pub delivered: i64,
    pub pending: i64,
    pub customers: Vec<Customer>,
    pub orders: Vec<OrderSummary>,
}

/// Customer dashboard template. All figures are scoped to the one customer.
#[derive(Template, WebTemplate)]
#[template(path = "user_dashboard.html")]
pub struct UserDashboardTemplate {
    pub username: String,
    pub total_orders: i64,
    pub delivered: i64,
    pub pending: i64,
    pub orders: Vec<OrderSummary>,
}

// =============================================================================
// Routes
// =============================================================================

/// Root page: admin dashboard, or a redirect to `/user` for customers.
pub async fn home(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Result<Response> {
    if user.role == Role::Customer {
        return Ok(Redirect::to("/user").into_response());
    }

    let customers = CustomerRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let total_customers = customers.count().await?;
    let total_orders = orders.count_all().await?;
    let delivered = orders.count_by_status(OrderStatus::Delivered).await?;
    let pending = orders.count_by_status(OrderStatus::Pending).await?;

    let customer_list = customers.list_all().await?;
    let order_list = orders.list_all().await?;

    Ok(DashboardTemplate {
        username: user.username.to_string(),
        total_customers,
        total_orders,
        delivered,
        pending,
        customers: customer_list,
        orders: order_list,
    }
    .into_response())
}

/// Customer dashboard: the customer's own orders and counts, nothing else.
pub async fn user_dashboard(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
) -> Result<Response> {
    let customer_id = user
        .customer_id
        .ok_or_else(|| AppError::Internal("customer account has no linked profile".to_string()))?;

    let orders = OrderRepository::new(state.pool());

    let total_orders = orders.count_for_customer(customer_id).await?;
    let delivered = orders
        .count_for_customer_by_status(customer_id, OrderStatus::Delivered)
        .await?;
    let pending = orders
        .count_for_customer_by_status(customer_id, OrderStatus::Pending)
        .await?;
    let order_list = orders.list_for_customer(customer_id).await?;

    Ok(UserDashboardTemplate {
        username: user.username.to_string(),
        total_orders,
        delivered,
        pending,
        orders: order_list,
    }
    .into_response())
}
