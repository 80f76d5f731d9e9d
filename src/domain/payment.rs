use super::order::OrderId;
use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-assigned payment identifier. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Result<Self, PaymentError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PaymentError::InvalidInput(
                "Payment id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PaymentId {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaymentId> for String {
    fn from(id: PaymentId) -> Self {
        id.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One provider payment attempt tied to one local order.
///
/// Records are append-only: written once at initiation, read at confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(rename = "order")]
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    /// Shopper IP captured at initiation; replayed as `PSU-IP-Address`.
    #[serde(rename = "ip_address")]
    pub origin_ip_address: String,
}

impl PaymentRecord {
    pub fn new(order_id: OrderId, payment_id: PaymentId, origin_ip_address: impl Into<String>) -> Self {
        Self {
            order_id,
            payment_id,
            origin_ip_address: origin_ip_address.into(),
        }
    }
}

/// Provider answer to a payment initiation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InitiatedPayment {
    pub id: PaymentId,
    #[serde(rename = "confirmLink")]
    pub confirm_link: String,
}

/// A status poll for a single payment. The provider expects
/// `psu_ip_address` in its `PSU-IP-Address` header.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusQuery {
    pub payment_id: PaymentId,
    pub psu_ip_address: String,
}

impl StatusQuery {
    pub fn for_record(record: &PaymentRecord) -> Self {
        Self {
            payment_id: record.payment_id.clone(),
            psu_ip_address: record.origin_ip_address.clone(),
        }
    }
}

/// Provider answer to a status poll. Only the coarse group matters here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentStatusReport {
    pub group: String,
}

/// A bank the shopper can pick at checkout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bank {
    pub id: String,
    pub name: String,
    #[serde(rename = "imageUri")]
    pub image_uri: String,
}
