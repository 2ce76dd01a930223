//! Stripe webhook verification and event types.
//!
//! The trust boundary of the payment flow: an inbound callback is untrusted
//! until its signature checks out against the raw request bytes.

mod error;
mod event;
mod verifier;

pub use error::WebhookError;
pub use event::{EventKind, PaymentIntent, StripeEvent, StripeEventData};
pub use verifier::{SignatureHeader, WebhookVerifier};
