use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use fornetto_core::{Customization, CustomizationId, CustomizationKind, Order};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub closed_recipe_id: Option<i32>,
    pub size: String,
    pub crust_thickness: String,
    /// Accepted but never trusted; the price is always computed server-side
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub customizations: BTreeMap<i64, CustomizationRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CustomizationRequest {
    pub kind: CustomizationKind,
    pub portion_quantity: u32,
    #[serde(default)]
    pub observation: Option<String>,
}

impl CreateOrderRequest {
    fn into_order(self) -> Order {
        let mut order = Order::new(self.size, self.crust_thickness);
        order.closed_recipe_id = self.closed_recipe_id;
        order.customizations = self
            .customizations
            .into_iter()
            .map(|(ingredient_id, c)| {
                (
                    ingredient_id,
                    Customization::new(c.kind, c.portion_quantity, c.observation),
                )
            })
            .collect();
        order
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub closed_recipe_id: Option<i32>,
    pub size: String,
    pub crust_thickness: String,
    pub price_cents: Option<i64>,
    pub customizations: BTreeMap<i64, CustomizationResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CustomizationResponse {
    pub ingredient_id: i64,
    pub order_id: i64,
    pub kind: CustomizationKind,
    pub portion_quantity: u32,
    pub observation: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let id = order.id.unwrap_or_default();
        let customizations = order
            .customizations
            .into_iter()
            .map(|(ingredient_id, c)| {
                let key = c.id.unwrap_or(CustomizationId::new(ingredient_id, id));
                (
                    ingredient_id,
                    CustomizationResponse {
                        ingredient_id: key.ingredient_id,
                        order_id: key.order_id,
                        kind: c.kind,
                        portion_quantity: c.portion_quantity,
                        observation: c.observation,
                    },
                )
            })
            .collect();

        Self {
            id,
            closed_recipe_id: order.closed_recipe_id,
            size: order.size,
            crust_thickness: order.crust_thickness,
            price_cents: order.price_cents,
            customizations,
            created_at: order.created_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order).delete(delete_order))
}

/// POST /orders
/// Create an order; the price is computed by the ingredient service
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    if req.price_cents.is_some() {
        tracing::debug!("ignoring client-supplied price on create");
    }

    let created = state.orchestrator.create(req.into_order()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /orders/{id}
/// Retrieve an order with its customization map populated
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.orchestrator.fetch(order_id).await?;
    Ok(Json(order.into()))
}

/// DELETE /orders/{id}
/// Cancel an order, reversing its ingredient consumption first
async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.orchestrator.delete(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
