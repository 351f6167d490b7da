//! Database operations for the Orderdesk `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts (username, password hash, role)
//! - `customers` - Customer profiles, one-to-one with `users`
//! - `products` - Catalog (read-only in the web app)
//! - `orders` - Orders referencing one customer and one product
//! - `tower_sessions.session` - Session storage (created by the session
//!   store's own migration at startup)
//!
//! Queries are bound at runtime (`sqlx::query` / `query_as`) so the crate
//! builds without a live database; rows decode straight into the domain
//! types in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p orderdesk-cli -- migrate
//! ```

pub mod customers;
pub mod orders;
pub mod products;
pub mod users;

pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors produced by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value failed to decode into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
