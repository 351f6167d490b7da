//! Domain models.
//!
//! These types represent validated domain objects; database rows decode
//! directly into them via `sqlx::FromRow`.

pub mod customer;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use customer::Customer;
pub use order::{NewOrder, Order, OrderSummary};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::User;
