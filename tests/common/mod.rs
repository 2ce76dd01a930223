//! Shared test harness: in-memory stores, a mock payment provider, and
//! helpers for signing webhook payloads the way Stripe does.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use mysite_api::adapters::http::{api_router, cors_layer, AppState};
use mysite_api::domain::order::{NewOrder, Order, OrderStatus};
use mysite_api::domain::subscriber::{NewSubscriber, Subscriber};
use mysite_api::domain::webhook::WebhookVerifier;
use mysite_api::ports::{
    NewPaymentIntent, OrderStore, PaymentError, PaymentIntentHandle, PaymentIntentState,
    PaymentProvider, StoreError, SubscriberStore,
};

pub const TEST_SECRET: &str = "whsec_test_secret";

/// In-memory order store with the same idempotency and ordering semantics
/// as the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryOrderStore {
    rows: Mutex<Vec<Order>>,
    seq: AtomicI64,
    pub insert_calls: AtomicUsize,
    pub inserted_count: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl InMemoryOrderStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn orders(&self) -> Vec<Order> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &NewOrder) -> Result<bool, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if order.stripe_payment_id.is_empty() {
            return Err(StoreError::Constraint(
                "stripe_payment_id must not be empty".to_string(),
            ));
        }
        // Single lock section: the check and the push are atomic, like the
        // database's conflict-tolerant insert.
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.stripe_payment_id == order.stripe_payment_id) {
            return Ok(false);
        }
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(id);
        rows.push(Order {
            id,
            stripe_payment_id: order.stripe_payment_id.clone(),
            product_id: order.product_id.clone(),
            product_name: order.product_name.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            status: order.status,
            customer_email: order.customer_email.clone(),
            created_at,
        });
        self.inserted_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn update_status(
        &self,
        stripe_payment_id: &str,
        status: OrderStatus,
    ) -> Result<bool, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.stripe_payment_id == stripe_payment_id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Order>), StoreError> {
        let rows = self.rows.lock().unwrap();
        let total = rows.len() as i64;
        let mut page = rows.clone();
        page.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let page = page
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((total, page))
    }
}

/// In-memory subscriber store.
#[derive(Default)]
pub struct InMemorySubscriberStore {
    rows: Mutex<Vec<Subscriber>>,
    seq: AtomicI64,
}

impl InMemorySubscriberStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn insert(&self, subscriber: &NewSubscriber) -> Result<bool, StoreError> {
        let email = mysite_api::domain::subscriber::normalize_email(&subscriber.email);
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.email == email) {
            return Ok(false);
        }
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(Subscriber {
            id,
            email,
            name: subscriber.name.clone(),
            source: subscriber.source.clone(),
            subscribed: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(id),
        });
        Ok(true)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Subscriber>), StoreError> {
        let rows = self.rows.lock().unwrap();
        let mut active: Vec<Subscriber> =
            rows.iter().filter(|r| r.subscribed).cloned().collect();
        let total = active.len() as i64;
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let page = active
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((total, page))
    }

    async fn unsubscribe(&self, email: &str) -> Result<bool, StoreError> {
        let email = mysite_api::domain::subscriber::normalize_email(email);
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.email == email && r.subscribed) {
            Some(row) => {
                row.subscribed = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mock payment provider recording create requests.
#[derive(Default)]
pub struct MockPaymentProvider {
    pub requests: Mutex<Vec<NewPaymentIntent>>,
    pub unconfigured: bool,
}

impl MockPaymentProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: NewPaymentIntent,
    ) -> Result<PaymentIntentHandle, PaymentError> {
        if self.unconfigured {
            return Err(PaymentError::NotConfigured);
        }
        self.requests.lock().unwrap().push(request);
        Ok(PaymentIntentHandle {
            id: "pi_mock".to_string(),
            client_secret: "pi_mock_secret".to_string(),
        })
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntentState, PaymentError> {
        if self.unconfigured {
            return Err(PaymentError::NotConfigured);
        }
        if id == "pi_unknown" {
            return Err(PaymentError::Rejected("No such payment_intent".to_string()));
        }
        Ok(PaymentIntentState {
            id: id.to_string(),
            status: "succeeded".to_string(),
            amount: 2999,
            currency: "usd".to_string(),
            metadata: HashMap::from([("product_id".to_string(), "prod_starter".to_string())]),
        })
    }
}

/// Full test fixture: router plus handles to the mocks behind it.
pub struct TestApp {
    pub router: Router,
    pub orders: Arc<InMemoryOrderStore>,
    pub subscribers: Arc<InMemorySubscriberStore>,
    pub payment_provider: Arc<MockPaymentProvider>,
}

/// Build an app wired to in-memory stores and the given webhook secret.
pub fn test_app(webhook_secret: &str) -> TestApp {
    let orders = InMemoryOrderStore::new();
    let subscribers = InMemorySubscriberStore::new();
    let payment_provider = MockPaymentProvider::new();

    let state = AppState {
        orders: orders.clone(),
        subscribers: subscribers.clone(),
        payment_provider: payment_provider.clone(),
        webhook_verifier: Arc::new(WebhookVerifier::new(webhook_secret)),
    };
    let router = api_router(state, cors_layer(&["http://localhost:3000".to_string()]));

    TestApp { router, orders, subscribers, payment_provider }
}

/// Compute a `Stripe-Signature` header for a payload, as Stripe would.
pub fn sign(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

/// Signature header for "now" with the shared test secret.
pub fn sign_now(payload: &str) -> String {
    sign(TEST_SECRET, Utc::now().timestamp(), payload)
}

/// A realistic `payment_intent.succeeded` payload.
pub fn succeeded_payload(payment_id: &str) -> String {
    serde_json::json!({
        "id": format!("evt_{payment_id}"),
        "type": "payment_intent.succeeded",
        "created": Utc::now().timestamp(),
        "livemode": false,
        "data": {"object": {
            "id": payment_id,
            "amount": 2999,
            "currency": "usd",
            "receipt_email": "jane@example.com",
            "metadata": {
                "product_id": "prod_starter",
                "product_name": "Starter Pack",
                "quantity": "1"
            }
        }}
    })
    .to_string()
}

/// A `payment_intent.payment_failed` payload.
pub fn failed_payload(payment_id: &str) -> String {
    serde_json::json!({
        "type": "payment_intent.payment_failed",
        "data": {"object": {"id": payment_id}}
    })
    .to_string()
}
