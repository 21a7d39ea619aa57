use crate::error::ClientError;
use crate::order::Order;
use async_trait::async_trait;

/// Outbound port to the ingredient/inventory service
#[async_trait]
pub trait IngredientClient: Send + Sync {
    /// Price an order. The full shape is sent (size, thickness, recipe id,
    /// customization map) since pricing may depend on ingredient choices.
    /// Returns the price in cents.
    async fn price_order(&self, order: &Order) -> Result<i64, ClientError>;

    /// Restore the inventory consumed by a now-cancelled order
    async fn reverse_order(&self, order: &Order) -> Result<(), ClientError>;
}
