//! Payment endpoints: webhook ingestion, checkout, verification, listing.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{error_response, AppState};
use crate::application::checkout::{CheckoutError, CreateIntentHandler};
use crate::application::reconcile::ReconcileWebhookHandler;
use crate::domain::order::{Order, OrderStatus};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-intent", post(create_intent))
        .route("/verify", get(verify_payment))
        .route("/webhook", post(stripe_webhook))
        .route("/orders", get(list_orders))
}

// ── DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub payment_intent: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub status: String,
    pub paid: bool,
    pub amount: i64,
    pub currency: String,
    pub metadata: std::collections::HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Serialize)]
pub struct OrderRecord {
    pub id: i64,
    pub stripe_payment_id: String,
    pub product_id: String,
    pub product_name: String,
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub customer_email: Option<String>,
    pub created_at: String,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            stripe_payment_id: order.stripe_payment_id,
            product_id: order.product_id,
            product_name: order.product_name,
            amount: order.amount,
            currency: order.currency,
            status: order.status,
            customer_email: order.customer_email,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrdersListResponse {
    pub total: i64,
    pub orders: Vec<OrderRecord>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// `POST /payments/create-intent` - create a Stripe PaymentIntent for a
/// catalog product and return the client secret.
async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Response {
    let handler = CreateIntentHandler::new(state.payment_provider.clone());
    match handler.handle(&request.product_id, request.quantity).await {
        Ok(handle) => Json(CreateIntentResponse { client_secret: handle.client_secret })
            .into_response(),
        Err(err) => {
            tracing::warn!(product_id = %request.product_id, error = %err, "create-intent failed");
            error_response(err.status_code(), &err.to_string())
        }
    }
}

/// `GET /payments/verify?payment_intent=pi_x` - server-side status check
/// for a success page, before delivering the product.
async fn verify_payment(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    match state
        .payment_provider
        .retrieve_payment_intent(&query.payment_intent)
        .await
    {
        Ok(intent) => Json(VerifyPaymentResponse {
            paid: intent.status == "succeeded",
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
            metadata: intent.metadata,
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(payment_intent = %query.payment_intent, error = %err, "verify failed");
            error_response(CheckoutError::Payment(err).status_code(), "payment verification failed")
        }
    }
}

/// `POST /payments/webhook` - signed event ingestion from Stripe.
///
/// The body is taken as raw bytes and verified before any JSON decoding;
/// a re-serialized body would not reproduce the signature. Every processed
/// outcome, duplicates and no-ops included, answers 200 so Stripe stops
/// redelivering; anything else and its retry policy kicks in.
async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let event = match state.webhook_verifier.verify_and_parse(&body, signature) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected");
            return error_response(err.status_code(), &err.to_string());
        }
    };

    let handler = ReconcileWebhookHandler::new(state.orders.clone());
    match handler.handle(&event).await {
        Ok(outcome) => {
            tracing::debug!(event_type = %event.event_type, ?outcome, "webhook processed");
            (StatusCode::OK, Json(json!({"received": true}))).into_response()
        }
        Err(err) => {
            tracing::error!(event_type = %event.event_type, error = %err, "webhook reconciliation failed");
            error_response(err.status_code(), &err.to_string())
        }
    }
}

/// `GET /payments/orders` - paginated order listing, newest first.
async fn list_orders(State(state): State<AppState>, Query(page): Query<PageQuery>) -> Response {
    match state.orders.list(page.limit, page.offset).await {
        Ok((total, orders)) => Json(OrdersListResponse {
            total,
            orders: orders.into_iter().map(OrderRecord::from).collect(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to list orders");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}
