//! PostgreSQL implementation of the subscriber store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::store_error;
use crate::domain::subscriber::{normalize_email, NewSubscriber, Subscriber};
use crate::ports::{StoreError, SubscriberStore};

/// sqlx-backed subscriber store.
pub struct PostgresSubscriberStore {
    pool: PgPool,
}

impl PostgresSubscriberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriberRow {
    id: i64,
    email: String,
    name: Option<String>,
    source: String,
    subscribed: bool,
    created_at: DateTime<Utc>,
}

impl From<SubscriberRow> for Subscriber {
    fn from(row: SubscriberRow) -> Self {
        Subscriber {
            id: row.id,
            email: row.email,
            name: row.name,
            source: row.source,
            subscribed: row.subscribed,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SubscriberStore for PostgresSubscriberStore {
    async fn insert(&self, subscriber: &NewSubscriber) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscribers (email, name, source)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(normalize_email(&subscriber.email))
        .bind(&subscriber.name)
        .bind(&subscriber.source)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Subscriber>), StoreError> {
        let rows: Vec<SubscriberRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, source, subscribed, created_at
            FROM subscribers
            WHERE subscribed = TRUE
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE subscribed = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?;

        Ok((total, rows.into_iter().map(Subscriber::from).collect()))
    }

    async fn unsubscribe(&self, email: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE subscribers SET subscribed = FALSE WHERE email = $1")
            .bind(normalize_email(email))
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
