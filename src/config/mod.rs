//! Application configuration.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values use the `MYSITE` prefix with `__`
//! separating nested keys, e.g. `MYSITE__DATABASE__URL`.
//!
//! The configuration is constructed once at process start and passed by
//! reference into the constructors that need it; there is no global
//! settings object.

mod database;
mod error;
mod payment;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, CORS origins).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// Payment configuration (Stripe keys).
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads `MYSITE`-prefixed variables:
    ///
    /// - `MYSITE__DATABASE__URL=postgresql://...`
    /// - `MYSITE__SERVER__PORT=8000`
    /// - `MYSITE__PAYMENT__STRIPE_WEBHOOK_SECRET=whsec_...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("MYSITE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.payment.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MYSITE__DATABASE__URL", "postgresql://test@localhost/test");
    }

    fn clear_env() {
        env::remove_var("MYSITE__DATABASE__URL");
        env::remove_var("MYSITE__SERVER__PORT");
        env::remove_var("MYSITE__PAYMENT__STRIPE_WEBHOOK_SECRET");
    }

    #[test]
    fn loads_with_database_url_only() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("minimal config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.server.port, 8000);
        assert!(config.payment.stripe_webhook_secret.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MYSITE__SERVER__PORT", "3000");
        env::set_var("MYSITE__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.payment.stripe_webhook_secret, "whsec_test");
    }
}
