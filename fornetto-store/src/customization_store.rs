use async_trait::async_trait;
use fornetto_core::{
    Customization, CustomizationId, CustomizationKind, CustomizationStore, StoreError,
};
use sqlx::PgPool;

/// Postgres-backed customization store, keyed by (ingredient id, order id)
pub struct PgCustomizationStore {
    pool: PgPool,
}

impl PgCustomizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomizationRow {
    ingredient_id: i64,
    order_id: i64,
    kind: String,
    portion_quantity: i32,
    observation: Option<String>,
}

impl TryFrom<CustomizationRow> for Customization {
    type Error = StoreError;

    fn try_from(row: CustomizationRow) -> Result<Self, StoreError> {
        let kind = CustomizationKind::from_code(&row.kind).ok_or_else(|| {
            StoreError::Query(format!("unknown customization kind code: {}", row.kind))
        })?;

        Ok(Customization {
            id: Some(CustomizationId::new(row.ingredient_id, row.order_id)),
            kind,
            portion_quantity: row.portion_quantity as u32,
            observation: row.observation,
        })
    }
}

#[async_trait]
impl CustomizationStore for PgCustomizationStore {
    async fn insert_all(&self, customizations: &[Customization]) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        for customization in customizations {
            let id = customization.id.ok_or_else(|| {
                StoreError::Query("customization without a composite id".to_string())
            })?;

            sqlx::query(
                r#"
                INSERT INTO order_customizations (ingredient_id, order_id, kind, portion_quantity, observation)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id.ingredient_id)
            .bind(id.order_id)
            .bind(customization.kind.code())
            .bind(customization.portion_quantity as i32)
            .bind(&customization.observation)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Customization>, StoreError> {
        let rows = sqlx::query_as::<_, CustomizationRow>(
            r#"
            SELECT ingredient_id, order_id, kind, portion_quantity, observation
            FROM order_customizations
            WHERE order_id = $1
            ORDER BY ingredient_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.into_iter().map(Customization::try_from).collect()
    }
}
