//! Request middleware: session layer and access-control guards.

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, RequireCustomer, clear_current_user,
    set_current_user,
};
pub use session::create_session_layer;
