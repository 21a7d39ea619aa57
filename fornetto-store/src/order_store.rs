use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fornetto_core::{Order, OrderStore, StoreError};
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Postgres-backed parent order store
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    closed_recipe_id: Option<i32>,
    size: String,
    crust_thickness: String,
    price_cents: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: Some(row.id),
            closed_recipe_id: row.closed_recipe_id,
            size: row.size,
            crust_thickness: row.crust_thickness,
            price_cents: row.price_cents,
            customizations: BTreeMap::new(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: &Order) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (closed_recipe_id, size, crust_thickness, price_cents, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(order.closed_recipe_id)
        .bind(&order.size)
        .bind(&order.crust_thickness)
        .bind(order.price_cents)
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, closed_recipe_id, size, crust_thickness, price_cents, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(row.map(Order::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        // Children go with the parent via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
