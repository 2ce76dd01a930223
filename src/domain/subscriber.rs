//! Subscriber domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An email subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscriber {
    /// Store-assigned identifier.
    pub id: i64,
    /// Normalized (lowercased, trimmed) email address; unique.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Where the signup came from, e.g. "website".
    pub source: String,
    /// False after unsubscribing (soft delete).
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new subscriber row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub email: String,
    pub name: Option<String>,
    pub source: String,
}

/// Canonical form of an email address used as the uniqueness key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
