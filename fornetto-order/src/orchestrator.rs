use fornetto_core::{
    Customization, CustomizationStore, IngredientClient, Order, OrderError, OrderStore,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Coordinates the ingredient client and the two stores through the order
/// create / fetch / delete workflows
pub struct OrderOrchestrator {
    ingredients: Arc<dyn IngredientClient>,
    orders: Arc<dyn OrderStore>,
    customizations: Arc<dyn CustomizationStore>,
}

impl OrderOrchestrator {
    pub fn new(
        ingredients: Arc<dyn IngredientClient>,
        orders: Arc<dyn OrderStore>,
        customizations: Arc<dyn CustomizationStore>,
    ) -> Self {
        Self {
            ingredients,
            orders,
            customizations,
        }
    }

    /// Create an order: price it, persist the parent, complete the child
    /// composite keys against the generated identity, persist the children.
    pub async fn create(&self, mut order: Order) -> Result<Order, OrderError> {
        // Price the full inbound shape, children included. Any client-supplied
        // price is overwritten.
        let price_cents = self.ingredients.price_order(&order).await?;
        order.price_cents = Some(price_cents);

        let pending = order.detach_customizations();
        let order_id = self.orders.insert(&order).await?;
        order.id = Some(order_id);

        if !pending.is_empty() {
            // The map key is the authoritative ingredient id, never whatever
            // the value carried in from the request.
            let completed: BTreeMap<i64, Customization> = pending
                .into_iter()
                .map(|(ingredient_id, c)| (ingredient_id, c.identified(ingredient_id, order_id)))
                .collect();

            let rows: Vec<Customization> = completed.values().cloned().collect();
            if let Err(err) = self.customizations.insert_all(&rows).await {
                // The parent landed but the children did not. Compensate by
                // removing the parent so no half-written order survives.
                if let Err(cleanup_err) = self.orders.delete(order_id).await {
                    error!(
                        order_id,
                        %cleanup_err,
                        "compensating delete failed after child write error"
                    );
                }
                return Err(OrderError::Persistence(err));
            }

            order.customizations = completed;
        }

        info!(order_id, price_cents, "order created");
        Ok(order)
    }

    /// Look up an order with its customization map eagerly populated, keyed
    /// by ingredient id to match create's output shape. No side effects.
    pub async fn fetch(&self, id: i64) -> Result<Order, OrderError> {
        let mut order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        for customization in self.customizations.list_by_order(id).await? {
            if let Some(key) = customization.id {
                order.customizations.insert(key.ingredient_id, customization);
            }
        }

        Ok(order)
    }

    /// Cancel an order. Inventory reversal runs strictly before the local
    /// delete: if reversal fails, the record is still here to retry against.
    /// Deleting first would leave the inventory inconsistent with nothing
    /// local to retry.
    pub async fn delete(&self, id: i64) -> Result<(), OrderError> {
        let order = self.fetch(id).await?;

        self.ingredients.reverse_order(&order).await?;

        // The record can vanish between lookup and delete; a concurrent
        // second cancellation then observes not-found.
        if !self.orders.delete(id).await? {
            return Err(OrderError::NotFound(id));
        }

        info!(order_id = id, "order deleted");
        Ok(())
    }
}
