//! Outbound payment gateway port.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Request to create a payment intent with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentIntent {
    /// Amount in minor units, priced server-side.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Metadata echoed back on webhook events; this is how the order
    /// flow learns which product was bought.
    pub metadata: Vec<(String, String)>,
}

/// A freshly created payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentHandle {
    pub id: String,
    /// Safe to hand to the frontend; it can confirm but not charge.
    pub client_secret: String,
}

/// Provider-side view of an intent, used by the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentState {
    pub id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

/// Errors from the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No API key configured; a deployment problem (server fault).
    #[error("payment provider is not configured")]
    NotConfigured,

    /// The provider rejected the request (client fault).
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("payment provider unreachable: {0}")]
    Network(String),

    /// The provider answered with something we could not interpret.
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Request/response API of the external payment gateway.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent; the returned client secret goes to the
    /// frontend for confirmation.
    async fn create_payment_intent(
        &self,
        request: NewPaymentIntent,
    ) -> Result<PaymentIntentHandle, PaymentError>;

    /// Retrieve the provider's current view of an intent.
    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntentState, PaymentError>;
}
