//! Customer domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use orderdesk_core::{CustomerId, UserId};

/// A customer profile, linked one-to-one with a [`crate::models::User`].
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// The account this profile belongs to.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, if provided.
    pub email: Option<String>,
    /// Contact phone number, if provided.
    pub phone: Option<String>,
    /// Stored filename of the uploaded profile picture, if any.
    pub profile_pic: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}
