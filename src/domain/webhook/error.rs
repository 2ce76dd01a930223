//! Webhook error taxonomy.
//!
//! Three families matter to the caller: deployment misconfiguration (5xx),
//! forged or malformed requests (4xx), and store faults (5xx, retried by
//! Stripe's delivery). Expected no-ops like "already exists" are never
//! errors; they are boolean outcomes on the store side.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while verifying or applying a webhook event.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signing secret is unset or empty. A deployment problem,
    /// not a request problem.
    #[error("webhook signing secret is not configured")]
    MissingSecret,

    /// Signature does not match the payload. Forged or corrupted request.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// Event timestamp is outside the accepted replay window.
    #[error("webhook timestamp out of range")]
    TimestampOutOfRange,

    /// Signature header or JSON payload could not be parsed.
    #[error("malformed webhook request: {0}")]
    Parse(String),

    /// A field the reconciliation flow needs is missing from the event.
    #[error("missing event field: {0}")]
    MissingField(&'static str),

    /// The order store failed with an operational fault.
    #[error("order store failure: {0}")]
    Store(String),
}

impl WebhookError {
    /// True when Stripe should redeliver the event.
    ///
    /// Stripe retries on any non-2xx, but only these cases can actually
    /// succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::MissingSecret | WebhookError::Store(_))
    }

    /// HTTP status for the webhook response.
    ///
    /// Client faults (forgery, garbage payloads) are 400; anything the
    /// operator has to fix is 500. The caller never sees more detail.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSecret | WebhookError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::Parse(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_server_fault() {
        let err = WebhookError::MissingSecret;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_retryable());
    }

    #[test]
    fn signature_mismatch_is_client_fault() {
        let err = WebhookError::InvalidSignature;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.is_retryable());
    }

    #[test]
    fn stale_timestamp_is_client_fault() {
        assert_eq!(
            WebhookError::TimestampOutOfRange.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn parse_failures_are_client_faults() {
        assert_eq!(
            WebhookError::Parse("bad json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::MissingField("id").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_fault_is_retryable_server_fault() {
        let err = WebhookError::Store("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_retryable());
    }

    #[test]
    fn display_never_embeds_secret_material() {
        // Messages are fixed strings plus request-derived context only.
        assert_eq!(
            WebhookError::MissingSecret.to_string(),
            "webhook signing secret is not configured"
        );
        assert_eq!(
            WebhookError::InvalidSignature.to_string(),
            "invalid webhook signature"
        );
    }
}
