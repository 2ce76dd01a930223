//! Subscriber endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{error_response, AppState};
use crate::domain::subscriber::{NewSubscriber, Subscriber};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(subscribe).get(list_subscribers))
        .route("/:email", delete(unsubscribe))
}

// ── DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "website".to_string()
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
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
pub struct SubscriberRecord {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub source: String,
    pub created_at: String,
}

impl From<Subscriber> for SubscriberRecord {
    fn from(subscriber: Subscriber) -> Self {
        Self {
            id: subscriber.id,
            email: subscriber.email,
            name: subscriber.name,
            source: subscriber.source,
            created_at: subscriber.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscribersListResponse {
    pub total: i64,
    pub subscribers: Vec<SubscriberRecord>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// `POST /subscribers` - add a subscriber.
///
/// Answers success even for duplicates so the response does not leak
/// whether an email is already in the database.
async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Response {
    if request.email.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "email must not be empty");
    }

    let subscriber = NewSubscriber {
        email: request.email,
        name: request.name,
        source: request.source,
    };

    match state.subscribers.insert(&subscriber).await {
        Ok(_inserted) => Json(SubscribeResponse {
            success: true,
            message: "Thanks for subscribing!".to_string(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to insert subscriber");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}

/// `GET /subscribers` - paginated listing of active subscribers.
async fn list_subscribers(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Response {
    match state.subscribers.list(page.limit, page.offset).await {
        Ok((total, subscribers)) => Json(SubscribersListResponse {
            total,
            subscribers: subscribers.into_iter().map(SubscriberRecord::from).collect(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to list subscribers");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}

/// `DELETE /subscribers/{email}` - soft-delete a subscriber.
async fn unsubscribe(State(state): State<AppState>, Path(email): Path<String>) -> Response {
    match state.subscribers.unsubscribe(&email).await {
        Ok(true) => Json(SubscribeResponse {
            success: true,
            message: "Unsubscribed successfully.".to_string(),
        })
        .into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "email not found"),
        Err(err) => {
            tracing::error!(error = %err, "failed to unsubscribe");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}
