//! Configuration error types.

use thiserror::Error;

/// Error loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying loader failure (missing variable, type mismatch).
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic validation failure for a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required configuration value is missing or empty.
    #[error("missing required configuration value: {0}")]
    MissingRequired(&'static str),

    /// Database URL is not a PostgreSQL connection string.
    #[error("database url must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    /// Pool sizing is inconsistent (min > max).
    #[error("database pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    /// Pool upper bound is unreasonably large.
    #[error("database pool max_connections exceeds 100")]
    PoolSizeTooLarge,

    /// Stripe secret key does not carry the expected `sk_` prefix.
    #[error("stripe secret key must start with sk_")]
    InvalidStripeKey,

    /// Stripe webhook secret does not carry the expected `whsec_` prefix.
    #[error("stripe webhook secret must start with whsec_")]
    InvalidStripeWebhookSecret,

    /// A CORS origin entry is not an absolute http(s) URL.
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
