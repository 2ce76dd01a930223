//! Checkout - creates payment intents for catalog products.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use super::catalog;
use crate::ports::{NewPaymentIntent, PaymentError, PaymentIntentHandle, PaymentProvider};

/// Errors surfaced by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The requested product id is not in the catalog.
    #[error("product not found")]
    UnknownProduct,

    /// Quantity must be a positive count within the order limit.
    #[error("quantity must be between 1 and {MAX_QUANTITY}")]
    InvalidQuantity,

    /// The payment provider failed.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl CheckoutError {
    /// HTTP status for the checkout response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::UnknownProduct => StatusCode::NOT_FOUND,
            CheckoutError::InvalidQuantity => StatusCode::BAD_REQUEST,
            CheckoutError::Payment(PaymentError::NotConfigured) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CheckoutError::Payment(PaymentError::Rejected(_)) => StatusCode::BAD_REQUEST,
            CheckoutError::Payment(PaymentError::Network(_))
            | CheckoutError::Payment(PaymentError::InvalidResponse(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Largest quantity a single order may carry. Also keeps the amount
/// arithmetic far away from `i64` overflow on client-supplied input.
pub const MAX_QUANTITY: i64 = 1_000;

/// Creates a payment intent for a product, priced server-side.
pub struct CreateIntentHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl CreateIntentHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    /// Look the product up, compute the charge, and create the intent.
    ///
    /// The metadata carries product id and name so the later webhook can
    /// reconstruct the order without trusting the frontend.
    pub async fn handle(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<PaymentIntentHandle, CheckoutError> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(CheckoutError::InvalidQuantity);
        }
        let product = catalog::find(product_id).ok_or(CheckoutError::UnknownProduct)?;

        let handle = self
            .provider
            .create_payment_intent(NewPaymentIntent {
                amount: product.unit_price * quantity,
                currency: product.currency.to_string(),
                metadata: vec![
                    ("product_id".to_string(), product.id.to_string()),
                    ("product_name".to_string(), product.name.to_string()),
                    ("quantity".to_string(), quantity.to_string()),
                ],
            })
            .await?;

        tracing::info!(product_id, quantity, intent_id = %handle.id, "payment intent created");
        Ok(handle)
    }
}
