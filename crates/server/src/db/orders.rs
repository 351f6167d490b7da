//! Order repository for database operations.
//!
//! Carries the dashboard aggregation queries and the all-or-nothing batch
//! insert used by the order-creation form.

use sqlx::PgPool;

use orderdesk_core::{CustomerId, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderSummary};

const SUMMARY_SELECT: &str = r"
    SELECT o.id, o.customer_id, c.name AS customer_name, p.name AS product_name,
           o.status, o.note, o.created_at
    FROM orders o
    JOIN customers c ON c.id = o.customer_id
    JOIN products p ON p.id = o.product_id
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, customer_id, product_id, status, note, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Get an order joined with customer and product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_summary(&self, id: OrderId) -> Result<Option<OrderSummary>, RepositoryError> {
        let summary =
            sqlx::query_as::<_, OrderSummary>(&format!("{SUMMARY_SELECT} WHERE o.id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(summary)
    }

    /// List all orders with customer and product names, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders =
            sqlx::query_as::<_, OrderSummary>(&format!("{SUMMARY_SELECT} ORDER BY o.created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        Ok(orders)
    }

    /// List one customer's orders, newest first.
    ///
    /// This is the only listing reachable from the customer dashboard, so
    /// data isolation between customers reduces to this WHERE clause.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(&format!(
            "{SUMMARY_SELECT} WHERE o.customer_id = $1 ORDER BY o.created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Total number of orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Number of orders with the given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: OrderStatus) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Number of one customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Number of one customer's orders with the given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_customer_by_status(
        &self,
        customer_id: CustomerId,
        status: OrderStatus,
    ) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE customer_id = $1 AND status = $2",
        )
        .bind(customer_id)
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Insert a batch of orders for one customer in a single transaction.
    ///
    /// All rows commit together or not at all; callers validate rows before
    /// reaching this point.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails (in which
    /// case the transaction is rolled back and nothing is persisted).
    pub async fn create_batch(
        &self,
        customer_id: CustomerId,
        orders: &[NewOrder],
    ) -> Result<usize, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for order in orders {
            sqlx::query(
                r"
                INSERT INTO orders (customer_id, product_id, status, note)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(customer_id)
            .bind(order.product_id)
            .bind(order.status)
            .bind(order.note.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(orders.len())
    }

    /// Update an order's product, status, and note.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: OrderId, change: &NewOrder) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET product_id = $2, status = $3, note = $4
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(change.product_id)
        .bind(change.status)
        .bind(change.note.as_deref())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
