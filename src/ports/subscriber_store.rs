//! Subscriber persistence port.

use async_trait::async_trait;

use super::order_store::StoreError;
use crate::domain::subscriber::{NewSubscriber, Subscriber};

/// Persistence for email subscribers.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Insert a subscriber unless the (normalized) email already exists.
    ///
    /// Returns `true` when a row was created, `false` for duplicates.
    async fn insert(&self, subscriber: &NewSubscriber) -> Result<bool, StoreError>;

    /// One page of active subscribers, newest first, plus the count of
    /// active subscribers.
    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Subscriber>), StoreError>;

    /// Soft-delete by email. Returns `false` when the email is unknown.
    async fn unsubscribe(&self, email: &str) -> Result<bool, StoreError>;
}
