//! HTTP layer - axum routers, handlers and DTOs.

pub mod payments;
pub mod subscribers;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::webhook::WebhookVerifier;
use crate::ports::{OrderStore, PaymentProvider, SubscriberStore};

/// Shared application state, cloned per request.
///
/// Dependencies are trait objects so tests can swap in mocks without a
/// database or a Stripe account.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderStore>,
    pub subscribers: Arc<dyn SubscriberStore>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub webhook_verifier: Arc<WebhookVerifier>,
}

/// Assemble the full API router.
pub fn api_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/subscribers", subscribers::routes())
        .nest("/payments", payments::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer restricted to the configured origins.
///
/// Methods mirror what the API actually serves; headers are enumerated
/// because a wildcard cannot be combined with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Uniform JSON error body. Internal detail stays in the logs.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}
