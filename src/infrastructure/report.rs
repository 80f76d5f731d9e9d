use crate::domain::payment::{Bank, InitiatedPayment, PaymentId, PaymentStatusReport, StatusQuery};
use crate::domain::ports::PaymentProvider;
use crate::domain::request::PaymentInitiationRequest;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// A provider that answers status polls from an exported status report.
///
/// Used to replay a batch of provider statuses offline. It cannot start
/// payments or list banks.
#[derive(Debug, Default, Clone)]
pub struct StatusReportProvider {
    statuses: HashMap<PaymentId, String>,
}

impl StatusReportProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the status group of a payment. Later reports win.
    pub fn report(&mut self, payment_id: PaymentId, group: impl Into<String>) {
        self.statuses.insert(payment_id, group.into());
    }
}

#[async_trait]
impl PaymentProvider for StatusReportProvider {
    async fn init_payment(&self, _request: &PaymentInitiationRequest) -> Result<InitiatedPayment> {
        Err(PaymentError::ProviderError(
            "A status report cannot initiate payments".to_string(),
        ))
    }

    async fn get_payment_status(&self, query: &StatusQuery) -> Result<PaymentStatusReport> {
        self.statuses
            .get(&query.payment_id)
            .map(|group| PaymentStatusReport {
                group: group.clone(),
            })
            .ok_or_else(|| {
                PaymentError::ProviderError(format!(
                    "No status reported for payment {}",
                    query.payment_id
                ))
            })
    }

    async fn get_banks(&self, _country_code: &str) -> Result<Vec<Bank>> {
        Err(PaymentError::ProviderError(
            "A status report does not list banks".to_string(),
        ))
    }
}
