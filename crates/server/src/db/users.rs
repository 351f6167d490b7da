//! User repository for database operations.

use sqlx::PgPool;

use orderdesk_core::{Role, UserId, Username};

use super::RepositoryError;
use crate::models::{Customer, User};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, role, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, role, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user's password hash by username.
    ///
    /// Returns `None` if no user exists with that username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r"
            SELECT id, username, role, created_at, password_hash
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    username: r.username,
                    role: r.role,
                    created_at: r.created_at,
                },
                r.password_hash,
            )
        }))
    }

    /// Create a customer account: a `customer`-role user plus a linked
    /// profile row, in one transaction.
    ///
    /// The profile's display name is initialized from the username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_customer_account(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(User, Customer), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, 'customer')
            RETURNING id, username, role, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique_violation)?;

        let customer = sqlx::query_as::<_, Customer>(
            r"
            INSERT INTO customers (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, email, phone, profile_pic, created_at
            ",
        )
        .bind(user.id)
        .bind(username.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, customer))
    }

    /// Create an `admin`-role user. Only reachable from the management CLI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_admin(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, 'admin')
            RETURNING id, username, role, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique_violation)?;

        Ok(user)
    }
}

/// Row type for queries that also fetch the password hash.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    username: Username,
    role: Role,
    created_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}

/// Map a unique violation to `Conflict`, anything else to `Database`.
fn conflict_on_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("username already exists".to_owned());
    }
    RepositoryError::Database(e)
}
