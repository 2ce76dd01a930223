//! Ports - trait seams between the application and its collaborators.
//!
//! Adapters under `crate::adapters` provide the production implementations;
//! tests substitute in-memory mocks.

mod order_store;
mod payment_provider;
mod subscriber_store;

pub use order_store::{OrderStore, StoreError};
pub use payment_provider::{
    NewPaymentIntent, PaymentError, PaymentIntentHandle, PaymentIntentState, PaymentProvider,
};
pub use subscriber_store::SubscriberStore;
