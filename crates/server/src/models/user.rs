//! User domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use orderdesk_core::{Role, UserId, Username};

/// An authenticated account.
///
/// Holds identity and role membership only; customer profile data lives on
/// [`crate::models::Customer`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: Username,
    /// Role gating which handlers are reachable.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
