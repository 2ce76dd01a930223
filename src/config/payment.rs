//! Stripe configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe).
///
/// Both keys default to empty. An unset key is a deployment choice, not a
/// startup failure: requests that need Stripe report a server fault instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (`sk_test_...` or `sk_live_...`).
    #[serde(default)]
    pub stripe_secret_key: String,

    /// Stripe webhook signing secret (`whsec_...`).
    #[serde(default)]
    pub stripe_webhook_secret: String,
}

impl PaymentConfig {
    /// True when configured with a Stripe test-mode key.
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_test_")
    }

    /// Validate key prefixes for whatever keys are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.stripe_secret_key.is_empty() && !self.stripe_secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.is_empty()
            && !self.stripe_webhook_secret.starts_with("whsec_")
        {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        Ok(())
    }
}
