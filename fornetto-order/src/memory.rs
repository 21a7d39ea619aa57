use async_trait::async_trait;
use fornetto_core::{
    ClientError, Customization, CustomizationStore, IngredientClient, Order, OrderStore,
    StoreError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory customization store, keyed by (ingredient id, order id)
#[derive(Default)]
pub struct InMemoryCustomizationStore {
    rows: Mutex<HashMap<(i64, i64), Customization>>,
    insert_calls: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl InMemoryCustomizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bulk-insert calls issued against this store
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent bulk inserts fail, to exercise the partial-failure path
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }

    async fn remove_by_order(&self, order_id: i64) {
        self.rows
            .lock()
            .await
            .retain(|(_, owner), _| *owner != order_id);
    }
}

#[async_trait]
impl CustomizationStore for InMemoryCustomizationStore {
    async fn insert_all(&self, customizations: &[Customization]) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Query("simulated bulk insert failure".to_string()));
        }

        let mut rows = self.rows.lock().await;
        for customization in customizations {
            let id = customization.id.ok_or_else(|| {
                StoreError::Query("customization without a composite id".to_string())
            })?;
            rows.insert((id.ingredient_id, id.order_id), customization.clone());
        }
        Ok(())
    }

    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Customization>, StoreError> {
        let rows = self.rows.lock().await;
        let mut children: Vec<Customization> = rows
            .iter()
            .filter(|((_, owner), _)| *owner == order_id)
            .map(|(_, customization)| customization.clone())
            .collect();
        children.sort_by_key(|c| c.id.map(|id| id.ingredient_id));
        Ok(children)
    }
}

/// In-memory order store. Assigns sequential identities starting at 1 and
/// cascades deletes into the shared customization store.
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<i64, Order>>,
    next_id: AtomicI64,
    children: Arc<InMemoryCustomizationStore>,
    fail_deletes: AtomicBool,
    vanish_deletes: AtomicBool,
}

impl InMemoryOrderStore {
    pub fn new(children: Arc<InMemoryCustomizationStore>) -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            children,
            fail_deletes: AtomicBool::new(false),
            vanish_deletes: AtomicBool::new(false),
        }
    }

    pub async fn count(&self) -> usize {
        self.orders.lock().await.len()
    }

    /// Make subsequent deletes fail outright
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Make subsequent deletes report the row as already gone, simulating a
    /// concurrent removal between lookup and delete
    pub fn vanish_deletes(&self) {
        self.vanish_deletes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<i64, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = order.clone();
        stored.id = Some(id);
        self.orders.lock().await.insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.lock().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Query("simulated delete failure".to_string()));
        }
        if self.vanish_deletes.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let removed = self.orders.lock().await.remove(&id).is_some();
        if removed {
            self.children.remove_by_order(id).await;
        }
        Ok(removed)
    }
}

/// Mock ingredient client: fixed price, recorded reversals, injectable failures
pub struct MockIngredientClient {
    price_cents: i64,
    fail_pricing: AtomicBool,
    fail_reversal: AtomicBool,
    priced: Mutex<Vec<Order>>,
    reversed: Mutex<Vec<Order>>,
}

impl MockIngredientClient {
    pub fn new(price_cents: i64) -> Self {
        Self {
            price_cents,
            fail_pricing: AtomicBool::new(false),
            fail_reversal: AtomicBool::new(false),
            priced: Mutex::new(Vec::new()),
            reversed: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_pricing(&self) {
        self.fail_pricing.store(true, Ordering::SeqCst);
    }

    pub fn fail_reversal(&self) {
        self.fail_reversal.store(true, Ordering::SeqCst);
    }

    /// Orders received by the pricing operation, in call order
    pub async fn priced(&self) -> Vec<Order> {
        self.priced.lock().await.clone()
    }

    /// Orders received by the reversal operation, in call order
    pub async fn reversed(&self) -> Vec<Order> {
        self.reversed.lock().await.clone()
    }
}

#[async_trait]
impl IngredientClient for MockIngredientClient {
    async fn price_order(&self, order: &Order) -> Result<i64, ClientError> {
        if self.fail_pricing.load(Ordering::SeqCst) {
            return Err(ClientError::Unreachable("simulated outage".to_string()));
        }
        self.priced.lock().await.push(order.clone());
        Ok(self.price_cents)
    }

    async fn reverse_order(&self, order: &Order) -> Result<(), ClientError> {
        if self.fail_reversal.load(Ordering::SeqCst) {
            return Err(ClientError::Unreachable("simulated outage".to_string()));
        }
        self.reversed.lock().await.push(order.clone());
        Ok(())
    }
}
