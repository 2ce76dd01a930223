//! Stripe gateway adapter.
//!
//! Implements `PaymentProvider` against the Stripe REST API. Requests are
//! form-encoded with basic auth; the secret key lives in a
//! `secrecy::SecretString` and is never logged.

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::PaymentConfig;
use crate::ports::{
    NewPaymentIntent, PaymentError, PaymentIntentHandle, PaymentIntentState, PaymentProvider,
};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe client implementing the payment provider port.
pub struct StripeGateway {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl StripeGateway {
    /// Build a gateway from the payment configuration. An empty key is
    /// allowed; calls then fail with `PaymentError::NotConfigured`.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            api_key: SecretString::new(config.stripe_secret_key.clone()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str, PaymentError> {
        let key = self.api_key.expose_secret();
        if key.is_empty() {
            return Err(PaymentError::NotConfigured);
        }
        Ok(key)
    }

    /// Pull the provider's error message out of a non-2xx response.
    async fn rejection(response: reqwest::Response) -> PaymentError {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: ErrorDetail,
        }
        #[derive(Deserialize)]
        struct ErrorDetail {
            message: String,
        }

        match response.json::<ErrorBody>().await {
            Ok(body) => PaymentError::Rejected(body.error.message),
            Err(_) => PaymentError::Rejected("payment could not be processed".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    amount: i64,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[async_trait]
impl PaymentProvider for StripeGateway {
    async fn create_payment_intent(
        &self,
        request: NewPaymentIntent,
    ) -> Result<PaymentIntentHandle, PaymentError> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1/payment_intents", self.api_base_url);

        let mut params: Vec<(String, String)> = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency),
            ("automatic_payment_methods[enabled]".to_string(), "true".to_string()),
        ];
        for (key, value) in request.metadata {
            params.push((format!("metadata[{key}]"), value));
        }

        let response = self
            .http_client
            .post(&url)
            .basic_auth(api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::InvalidResponse("payment intent has no client_secret".to_string())
        })?;

        Ok(PaymentIntentHandle { id: intent.id, client_secret })
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntentState, PaymentError> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1/payment_intents/{}", self.api_base_url, id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(api_key, Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        Ok(PaymentIntentState {
            id: intent.id,
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
            metadata: intent.metadata,
        })
    }
}
