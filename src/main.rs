//! MySite API server entry point.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mysite_api::adapters::http::{api_router, cors_layer, AppState};
use mysite_api::adapters::postgres::{self, PostgresOrderStore, PostgresSubscriberStore};
use mysite_api::adapters::stripe::StripeGateway;
use mysite_api::config::AppConfig;
use mysite_api::domain::webhook::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    if config.payment.stripe_webhook_secret.is_empty() {
        tracing::warn!("stripe webhook secret is not configured; webhook calls will fail");
    }
    if config.payment.is_test_mode() {
        tracing::info!("stripe is configured with a test-mode key");
    }

    let pool = postgres::connect(&config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = AppState {
        orders: Arc::new(PostgresOrderStore::new(pool.clone())),
        subscribers: Arc::new(PostgresSubscriberStore::new(pool)),
        payment_provider: Arc::new(StripeGateway::new(&config.payment)),
        webhook_verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
    };

    let app = api_router(state, cors_layer(&config.server.allowed_origins));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "server ready");
    axum::serve(listener, app).await?;

    Ok(())
}
