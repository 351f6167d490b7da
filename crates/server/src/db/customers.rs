//! Customer repository for database operations.

use sqlx::PgPool;

use orderdesk_core::{CustomerId, UserId};

use super::RepositoryError;
use crate::models::Customer;

/// Profile fields accepted by the settings form.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// New stored filename; `None` leaves the existing picture in place.
    pub profile_pic: Option<String>,
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, user_id, name, email, phone, profile_pic, created_at
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Get the customer profile linked to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, user_id, name, email, phone, profile_pic, created_at
            FROM customers
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// List all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, user_id, name, email, phone, profile_pic, created_at
            FROM customers
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(customers)
    }

    /// Total number of customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Update a customer's profile. The picture is only replaced when the
    /// update carries a new filename.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: CustomerId,
        update: &ProfileUpdate,
    ) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET name = $2,
                email = $3,
                phone = $4,
                profile_pic = COALESCE($5, profile_pic)
            WHERE id = $1
            RETURNING id, user_id, name, email, phone, profile_pic, created_at
            ",
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.email.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.profile_pic.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(customer)
    }
}
