//! PostgreSQL implementation of the order store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::store_error;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::ports::{OrderStore, StoreError};

/// sqlx-backed order store.
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    stripe_payment_id: String,
    product_id: String,
    product_name: String,
    amount: i64,
    currency: String,
    status: String,
    customer_email: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            StoreError::Database(format!("unknown order status in row {}: {}", row.id, row.status))
        })?;
        Ok(Order {
            id: row.id,
            stripe_payment_id: row.stripe_payment_id,
            product_id: row.product_id,
            product_name: row.product_name,
            amount: row.amount,
            currency: row.currency,
            status,
            customer_email: row.customer_email,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &NewOrder) -> Result<bool, StoreError> {
        if order.stripe_payment_id.is_empty() {
            return Err(StoreError::Constraint(
                "stripe_payment_id must not be empty".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO orders
                (stripe_payment_id, product_id, product_name, amount, currency, status, customer_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (stripe_payment_id) DO NOTHING
            "#,
        )
        .bind(&order.stripe_payment_id)
        .bind(&order.product_id)
        .bind(&order.product_name)
        .bind(order.amount)
        .bind(&order.currency)
        .bind(order.status.as_str())
        .bind(&order.customer_email)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(
        &self,
        stripe_payment_id: &str,
        status: OrderStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE stripe_payment_id = $1")
            .bind(stripe_payment_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<Order>), StoreError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, stripe_payment_id, product_id, product_name,
                   amount, currency, status, customer_email, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        let orders = rows.into_iter().map(Order::try_from).collect::<Result<_, _>>()?;
        Ok((total, orders))
    }
}
