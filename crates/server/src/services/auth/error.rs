//! Authentication error types.

use thiserror::Error;

use orderdesk_core::UsernameError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password is wrong. Deliberately not split into
    /// bad-username vs bad-password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A user with this username already exists.
    #[error("username already taken")]
    UserAlreadyExists,

    /// The username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// The password failed validation.
    #[error("{0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
