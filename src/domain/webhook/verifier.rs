//! Stripe webhook signature verification.
//!
//! Verifies HMAC-SHA256 signatures over the exact raw request bytes. The
//! signed payload is `"{timestamp}.{body}"`; re-serialized JSON will not
//! reproduce byte-identical signatures, so the HTTP layer must hand over
//! the body before any parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::error::WebhookError;
use super::event::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

/// Events older than this are rejected (replay window).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Tolerance for signatures timestamped slightly in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed `Stripe-Signature` header.
///
/// Format: `t=<unix timestamp>,v1=<hex signature>[,v0=<legacy>]`. Unknown
/// fields are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a `Stripe-Signature` header value.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut v1_signature = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(WebhookError::Parse("malformed signature header".to_string()));
            };
            match key.trim() {
                "t" => {
                    let parsed = value
                        .parse()
                        .map_err(|_| WebhookError::Parse("invalid signature timestamp".to_string()))?;
                    timestamp = Some(parsed);
                }
                "v1" => {
                    let decoded = hex::decode(value)
                        .map_err(|_| WebhookError::Parse("invalid v1 signature hex".to_string()))?;
                    v1_signature = Some(decoded);
                }
                // v0 (legacy) and future fields are ignored
                _ => {}
            }
        }

        match (timestamp, v1_signature) {
            (Some(timestamp), Some(v1_signature)) => Ok(Self { timestamp, v1_signature }),
            (None, _) => Err(WebhookError::Parse("signature header missing timestamp".to_string())),
            (_, None) => Err(WebhookError::Parse("signature header missing v1 signature".to_string())),
        }
    }
}

/// Verifies that a webhook payload genuinely originates from Stripe.
///
/// Holds the pre-shared signing secret; constructed once at startup and
/// injected wherever the webhook route is wired up. Pure validation and
/// parsing, no side effects.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Create a verifier. An empty secret is allowed here; verification
    /// reports it as a configuration fault per request instead.
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Verify the signature over the raw payload and parse the event.
    ///
    /// # Errors
    ///
    /// - `MissingSecret` when no signing secret is configured
    /// - `Parse` for malformed headers or non-JSON payloads
    /// - `TimestampOutOfRange` outside the replay window
    /// - `InvalidSignature` when the HMAC does not match
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        if self.secret.is_empty() {
            return Err(WebhookError::MissingSecret);
        }

        let header = SignatureHeader::parse(signature_header)?;
        self.check_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_eq(&expected, &header.v1_signature) {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload)
            .map_err(|e| WebhookError::Parse(format!("invalid event payload: {e}")))
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        // Saturating: the header timestamp is attacker-controlled and may
        // sit at the i64 extremes.
        let age = chrono::Utc::now().timestamp().saturating_sub(timestamp);
        if age > MAX_EVENT_AGE_SECS || age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        // Feed "{timestamp}.{payload}" without copying the body.
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time byte comparison; length is not secret.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.ct_eq(b).into()
}
