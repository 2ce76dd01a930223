//! Webhook reconciliation - applies verified payment events to the order
//! store.
//!
//! Stateless per invocation: every decision derives from the event payload
//! plus at most one store round-trip. Stripe delivers at least once, so
//! duplicate "succeeded" events are the normal case, not an error; the
//! store's conflict-tolerant insert absorbs them.

use std::sync::Arc;

use crate::domain::order::{NewOrder, OrderStatus};
use crate::domain::webhook::{EventKind, StripeEvent, WebhookError};
use crate::ports::OrderStore;

/// What a reconciliation pass did. All variants acknowledge with 200;
/// the distinction exists for logging only and never reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A fresh order row was written.
    OrderRecorded,
    /// The order already existed; nothing was written.
    DuplicateIgnored,
    /// An existing order was marked failed.
    MarkedFailed,
    /// A failure event arrived for a reference we never recorded.
    /// Accepted gap: we do not fabricate a failed order with no context.
    UnknownReference,
    /// Event type outside the handled set; no side effects.
    Ignored,
}

/// Applies a verified event to the order store.
pub struct ReconcileWebhookHandler {
    orders: Arc<dyn OrderStore>,
}

impl ReconcileWebhookHandler {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Interpret the event type and apply the corresponding state change.
    ///
    /// # Errors
    ///
    /// Only hard store faults propagate; every expected outcome, including
    /// the no-ops, returns `Ok` so the HTTP layer acknowledges with 200
    /// and Stripe stops redelivering.
    pub async fn handle(&self, event: &StripeEvent) -> Result<ReconcileOutcome, WebhookError> {
        match event.kind() {
            EventKind::PaymentIntentSucceeded => self.record_order(event).await,
            EventKind::PaymentIntentFailed => self.mark_failed(event).await,
            EventKind::Unhandled => {
                tracing::debug!(event_type = %event.event_type, "ignoring unhandled event type");
                Ok(ReconcileOutcome::Ignored)
            }
        }
    }

    async fn record_order(&self, event: &StripeEvent) -> Result<ReconcileOutcome, WebhookError> {
        let intent = event.payment_intent()?;

        let order = NewOrder {
            stripe_payment_id: intent.id.clone(),
            product_id: intent.metadata_value("product_id").to_string(),
            product_name: intent.metadata_value("product_name").to_string(),
            amount: intent.amount,
            currency: intent.currency.clone(),
            status: OrderStatus::Succeeded,
            customer_email: intent.receipt_email.clone(),
        };

        let inserted = self
            .orders
            .insert(&order)
            .await
            .map_err(|e| WebhookError::Store(e.to_string()))?;

        if inserted {
            tracing::info!(payment_id = %intent.id, amount = intent.amount, "payment succeeded, order recorded");
            Ok(ReconcileOutcome::OrderRecorded)
        } else {
            tracing::info!(payment_id = %intent.id, "duplicate delivery, order already recorded");
            Ok(ReconcileOutcome::DuplicateIgnored)
        }
    }

    async fn mark_failed(&self, event: &StripeEvent) -> Result<ReconcileOutcome, WebhookError> {
        let intent = event.payment_intent()?;

        let found = self
            .orders
            .update_status(&intent.id, OrderStatus::Failed)
            .await
            .map_err(|e| WebhookError::Store(e.to_string()))?;

        if found {
            tracing::info!(payment_id = %intent.id, "payment failed, order marked failed");
            Ok(ReconcileOutcome::MarkedFailed)
        } else {
            tracing::warn!(payment_id = %intent.id, "payment failed for unknown order, ignoring");
            Ok(ReconcileOutcome::UnknownReference)
        }
    }
}
