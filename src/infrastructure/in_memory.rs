use crate::domain::order::{OrderId, OrderSnapshot, OrderStateId};
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::{OrderRepository, PaymentRecordStore};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// Uses `Arc<RwLock<HashMap<PaymentId, PaymentRecord>>>`; the duplicate check
/// and the insert happen under the same write lock.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRecordStore {
    records: Arc<RwLock<HashMap<PaymentId, PaymentRecord>>>,
}

impl InMemoryPaymentRecordStore {
    /// Creates a new, empty in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRecordStore for InMemoryPaymentRecordStore {
    async fn put(&self, record: PaymentRecord) -> Result<()> {
        let mut records = self.records.write().await;
        match records.entry(record.payment_id.clone()) {
            Entry::Occupied(_) => Err(PaymentError::DuplicateKey(record.payment_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn find_by_payment_id(&self, payment_id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let records = self.records.read().await;
        Ok(records.get(payment_id).cloned())
    }
}

/// A thread-safe in-memory order book standing in for the host platform.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, OrderSnapshot>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an order.
    pub async fn insert(&self, order: OrderSnapshot) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find(&self, order_id: OrderId) -> Result<Option<OrderSnapshot>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&order_id).cloned())
    }

    async fn transition(
        &self,
        order_id: OrderId,
        expected: Option<OrderStateId>,
        to: OrderStateId,
    ) -> Result<()> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or_else(|| PaymentError::NotFound(format!("order {}", order_id)))?;

        if order.current_state != expected {
            return Err(PaymentError::StateConflict { order_id });
        }
        order.current_state = Some(to);
        Ok(())
    }
}
