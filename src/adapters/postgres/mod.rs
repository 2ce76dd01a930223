//! PostgreSQL adapters - sqlx-backed implementations of the store ports.
//!
//! Correctness under concurrency is delegated to the database: uniqueness
//! constraints plus `ON CONFLICT DO NOTHING` give atomic, race-safe
//! idempotent inserts with no in-process coordination.

mod order_store;
mod subscriber_store;

pub use order_store::PostgresOrderStore;
pub use subscriber_store::PostgresSubscriberStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::ports::StoreError;

/// Open a connection pool against the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Apply the embedded migrations (creates the subscribers and orders
/// tables when missing).
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map an sqlx failure onto the store fault taxonomy.
///
/// The uniqueness no-op never reaches this path; `ON CONFLICT DO NOTHING`
/// succeeds with zero affected rows instead of erroring.
fn store_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.constraint().is_some() => {
            StoreError::Constraint(db.to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}
