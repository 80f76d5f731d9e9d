use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Host-platform order identifier.
pub type OrderId = u32;

/// A local order-state identifier as configured on the host platform.
///
/// Zero is never a valid state id: the host uses it as "unset", so it is
/// rejected on construction instead of being carried around as a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OrderStateId(NonZeroU32);

impl OrderStateId {
    pub fn new(id: u32) -> Result<Self, PaymentError> {
        NonZeroU32::new(id).map(Self).ok_or_else(|| {
            PaymentError::InvalidInput("Order state id must be non-zero".to_string())
        })
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for OrderStateId {
    type Error = PaymentError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderStateId> for u32 {
    fn from(id: OrderStateId) -> Self {
        id.get()
    }
}

impl fmt::Display for OrderStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four canonical states a bank-redirect payment can put an order in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStateTarget {
    Started,
    Pending,
    Completed,
    Failed,
}

impl OrderStateTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStateTarget::Started => "started",
            OrderStateTarget::Pending => "pending",
            OrderStateTarget::Completed => "completed",
            OrderStateTarget::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a host order, as much as the payment core needs.
pub trait OrderView {
    fn id(&self) -> OrderId;
    fn current_state_id(&self) -> Option<OrderStateId>;
}

/// Read-only view of a host cart at checkout.
pub trait CheckoutCart {
    /// Order total including taxes and shipping.
    fn total_amount(&self) -> Decimal;
    /// ISO 4217 code of the cart currency.
    fn currency_code(&self) -> &str;
}

/// A point-in-time copy of a host order and the secure key of its customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    #[serde(rename = "order")]
    pub id: OrderId,
    #[serde(rename = "state")]
    pub current_state: Option<OrderStateId>,
    /// `None` when the customer record could not be loaded.
    #[serde(rename = "secure_key")]
    pub customer_secure_key: Option<String>,
}

impl OrderSnapshot {
    pub fn new(id: OrderId, current_state: Option<OrderStateId>) -> Self {
        Self {
            id,
            current_state,
            customer_secure_key: None,
        }
    }

    pub fn with_secure_key(mut self, key: impl Into<String>) -> Self {
        self.customer_secure_key = Some(key.into());
        self
    }
}

impl OrderView for OrderSnapshot {
    fn id(&self) -> OrderId {
        self.id
    }

    fn current_state_id(&self) -> Option<OrderStateId> {
        self.current_state
    }
}

/// Plain cart value used when the host hands over totals directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub total: Decimal,
    pub currency: String,
}

impl Cart {
    pub fn new(total: Decimal, currency: impl Into<String>) -> Self {
        Self {
            total,
            currency: currency.into(),
        }
    }
}

impl CheckoutCart for Cart {
    fn total_amount(&self) -> Decimal {
        self.total
    }

    fn currency_code(&self) -> &str {
        &self.currency
    }
}
