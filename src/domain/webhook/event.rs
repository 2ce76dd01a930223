//! Stripe webhook event envelope and payment-intent payload.
//!
//! Only the fields the reconciliation flow reads are modeled; the rest of
//! Stripe's event schema is ignored by serde.

use std::collections::HashMap;

use serde::Deserialize;

use super::WebhookError;

/// A verified Stripe event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Event identifier (`evt_...`). Absent in hand-rolled test payloads.
    #[serde(default)]
    pub id: String,

    /// Event type string, e.g. "payment_intent.succeeded".
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp the event was created at.
    #[serde(default)]
    pub created: i64,

    /// Whether this is a live-mode event.
    #[serde(default)]
    pub livemode: bool,

    /// Event-specific payload.
    pub data: StripeEventData,
}

/// Container for the polymorphic event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object that triggered the event; shape depends on the type tag.
    pub object: serde_json::Value,
}

/// The closed set of event types this service reacts to.
///
/// Everything else is `Unhandled` and acknowledged without side effects,
/// so subscribing the endpoint to extra events in the Stripe dashboard is
/// harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A payment completed; record the order.
    PaymentIntentSucceeded,
    /// A payment attempt failed; mark the order failed if we have one.
    PaymentIntentFailed,
    /// Any other event type; acknowledged as a no-op.
    Unhandled,
}

impl EventKind {
    /// Map a Stripe event type string onto the closed set.
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "payment_intent.succeeded" => EventKind::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => EventKind::PaymentIntentFailed,
            _ => EventKind::Unhandled,
        }
    }
}

impl StripeEvent {
    /// The event type as a closed enum.
    pub fn kind(&self) -> EventKind {
        EventKind::from_type(&self.event_type)
    }

    /// Deserialize the data object as a PaymentIntent.
    ///
    /// # Errors
    ///
    /// `WebhookError::Parse` when the object does not look like a payment
    /// intent, `WebhookError::MissingField` when the intent id is empty.
    pub fn payment_intent(&self) -> Result<PaymentIntent, WebhookError> {
        let intent: PaymentIntent = serde_json::from_value(self.data.object.clone())
            .map_err(|e| WebhookError::Parse(format!("invalid payment intent object: {e}")))?;
        if intent.id.is_empty() {
            return Err(WebhookError::MissingField("data.object.id"));
        }
        Ok(intent)
    }
}

/// The slice of a Stripe PaymentIntent the order flow cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// PaymentIntent id (`pi_...`); the external payment reference.
    /// Defaults to empty so a missing id surfaces as `MissingField`
    /// rather than a generic parse error.
    #[serde(default)]
    pub id: String,

    /// Amount in minor units.
    #[serde(default)]
    pub amount: i64,

    /// Lowercase ISO currency code.
    #[serde(default)]
    pub currency: String,

    /// Email Stripe will send the receipt to, when present.
    #[serde(default)]
    pub receipt_email: Option<String>,

    /// Free-form metadata set at intent creation time.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntent {
    /// Metadata value by key, defaulting to empty like the intent was
    /// created without it.
    pub fn metadata_value(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }
}
