//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Auth (unauthenticated only; logged-in users are redirected home)
//! GET  /register                - Registration page
//! POST /register                - Register action
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /logout                  - Logout action (POST accepted too)
//!
//! # Dashboards
//! GET  /                        - Admin dashboard (customers redirect to /user)
//! GET  /user                    - Customer dashboard (own orders only)
//!
//! # Admin
//! GET  /products                - Product listing
//! GET  /customer/{id}           - Customer detail with order filtering
//! GET  /create_order/{id}       - Batch order form for a customer
//! POST /create_order/{id}       - Batch create action (all-or-nothing)
//! GET  /update_order/{id}       - Order edit form
//! POST /update_order/{id}       - Order update action
//! GET  /delete_order/{id}       - Delete confirmation page (no side effects)
//! POST /delete_order/{id}       - Delete action
//!
//! # Customer
//! GET  /account                 - Profile settings form
//! POST /account                 - Profile update (multipart, optional picture)
//! ```

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
}

/// Create the order management routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create_order/{customer_id}",
            get(orders::create_page).post(orders::create),
        )
        .route(
            "/update_order/{order_id}",
            get(orders::update_page).post(orders::update),
        )
        .route(
            "/delete_order/{order_id}",
            get(orders::delete_page).post(orders::delete),
        )
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/user", get(dashboard::user_dashboard))
        .route("/products", get(products::index))
        .route("/customer/{id}", get(customers::show))
        .route(
            "/account",
            get(settings::settings_page).post(settings::update_settings),
        )
        .merge(order_routes())
        .merge(auth_routes())
}
