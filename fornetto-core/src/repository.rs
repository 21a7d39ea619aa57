use crate::error::StoreError;
use crate::order::{Customization, Order};
use async_trait::async_trait;

/// Keyed store for parent order records. Assigns identity on insert.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a parent record (children already detached) and return the
    /// generated identity
    async fn insert(&self, order: &Order) -> Result<i64, StoreError>;

    /// Parent record only; the customization map comes back empty
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, StoreError>;

    /// Remove the order, cascading to its customizations. Returns whether a
    /// row existed, so a concurrent delete surfaces as not-found instead of
    /// corrupt state
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Store for customization child records keyed by (ingredient id, order id)
#[async_trait]
pub trait CustomizationStore: Send + Sync {
    /// Bulk insert. Every element must carry a complete composite id, which
    /// implies the parent order is already persisted
    async fn insert_all(&self, customizations: &[Customization]) -> Result<(), StoreError>;

    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Customization>, StoreError>;
}
