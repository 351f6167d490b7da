//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, Role, UserId, Username};

/// Session-stored principal.
///
/// Minimal data stored in the session to identify the logged-in user.
/// Handlers receive this through the guard extractors in
/// [`crate::middleware::auth`] rather than reading ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's login name.
    pub username: Username,
    /// User's role.
    pub role: Role,
    /// Linked customer profile, present for `customer`-role users.
    pub customer_id: Option<CustomerId>,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
