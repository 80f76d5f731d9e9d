use super::order::{OrderId, OrderSnapshot, OrderStateId};
use super::payment::{Bank, InitiatedPayment, PaymentId, PaymentRecord, PaymentStatusReport, StatusQuery};
use super::request::PaymentInitiationRequest;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only mapping from provider payment ids to local orders.
#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    /// Fails with `DuplicateKey` if the payment id is already recorded.
    async fn put(&self, record: PaymentRecord) -> Result<()>;
    async fn find_by_payment_id(&self, payment_id: &PaymentId) -> Result<Option<PaymentRecord>>;
}

/// The provider API client. Transport, auth and retries live behind it.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn init_payment(&self, request: &PaymentInitiationRequest) -> Result<InitiatedPayment>;
    async fn get_payment_status(&self, query: &StatusQuery) -> Result<PaymentStatusReport>;
    async fn get_banks(&self, country_code: &str) -> Result<Vec<Bank>>;
}

/// Host order access.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find(&self, order_id: OrderId) -> Result<Option<OrderSnapshot>>;

    /// Moves the order to `to` only if it is still in `expected`.
    ///
    /// Fails with `StateConflict` otherwise, which lets two concurrent
    /// confirmations for the same payment race without both transitioning.
    async fn transition(
        &self,
        order_id: OrderId,
        expected: Option<OrderStateId>,
        to: OrderStateId,
    ) -> Result<()>;
}

pub type PaymentRecordStoreBox = Box<dyn PaymentRecordStore>;
pub type PaymentProviderBox = Box<dyn PaymentProvider>;
pub type OrderRepositoryBox = Box<dyn OrderRepository>;
