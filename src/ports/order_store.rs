//! Order persistence port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::{NewOrder, Order, OrderStatus};

/// Operational fault from the backing datastore.
///
/// Deliberately distinct from the expected no-op outcomes ("already
/// exists", "not found"), which the store operations report as booleans.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A constraint other than the expected uniqueness no-op was violated.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The datastore is unreachable or the statement failed outright.
    #[error("database error: {0}")]
    Database(String),
}

/// Durable, idempotent persistence of orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert an order unless one already exists for its payment reference.
    ///
    /// Returns `true` when a row was created, `false` when the reference
    /// was already present (the no-op case). Uses a conflict-tolerant
    /// atomic insert: concurrent calls with the same reference race
    /// safely, and at most one observes `true`.
    ///
    /// An empty payment reference is a `StoreError::Constraint`.
    async fn insert(&self, order: &NewOrder) -> Result<bool, StoreError>;

    /// Set the status of the order with the given payment reference.
    ///
    /// Returns `false` when no such order exists. Never touches amount,
    /// currency or product fields.
    async fn update_status(
        &self,
        stripe_payment_id: &str,
        status: OrderStatus,
    ) -> Result<bool, StoreError>;

    /// One page of orders, newest first, plus the unfiltered total count.
    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Order>), StoreError>;
}
