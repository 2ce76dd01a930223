//! Order domain types.
//!
//! An order represents one payment transaction, keyed by the Stripe
//! PaymentIntent id. That id is the idempotency anchor for the whole
//! webhook flow: at most one order row ever exists per payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Closed set for now; new statuses are a type-visible addition here plus
/// a mapping in the stores, not a stringly-typed drive-by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created but not yet resolved by a webhook event.
    Pending,
    /// Payment completed.
    Succeeded,
    /// Payment attempt failed.
    Failed,
}

impl OrderStatus {
    /// Database representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Succeeded => "succeeded",
            OrderStatus::Failed => "failed",
        }
    }

    /// Parse the database representation back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "succeeded" => Some(OrderStatus::Succeeded),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }
}

/// A persisted payment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Store-assigned identifier.
    pub id: i64,
    /// Stripe PaymentIntent id; unique, immutable after creation.
    pub stripe_payment_id: String,
    /// Product identifier from the intent metadata.
    pub product_id: String,
    /// Product display name from the intent metadata.
    pub product_name: String,
    /// Amount in minor units (cents).
    pub amount: i64,
    /// ISO currency code, lowercase (Stripe convention).
    pub currency: String,
    /// Current order status.
    pub status: OrderStatus,
    /// Receipt email, when Stripe supplied one.
    pub customer_email: Option<String>,
    /// Assigned by the store at insert; immutable.
    pub created_at: DateTime<Utc>,
}

/// Fields for a new order row; id and created_at are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub stripe_payment_id: String,
    pub product_id: String,
    pub product_name: String,
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub customer_email: Option<String>,
}
