use super::engine::CheckoutEngine;
use crate::domain::order::{CheckoutCart, OrderView};
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::request::CallbackUrls;
use crate::error::{PaymentError, Result};
use tracing::{error, info, warn};

/// Stages of a payment initiation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiationStage {
    Building,
    Submitted,
    Recorded,
    Redirected,
}

/// Where to send the shopper after a successful initiation.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRedirect {
    pub payment_id: PaymentId,
    pub confirm_link: String,
}

impl CheckoutEngine {
    /// Starts a bank-redirect payment for an order.
    ///
    /// When a Started state is configured, the order is moved into it before
    /// the provider is called, and stays there if the provider rejects the
    /// payment. A payment record is written only after the provider accepted
    /// the payment, so every record points at a real provider-side payment.
    pub async fn initiate<C, O>(
        &self,
        cart: &C,
        order: &O,
        callbacks: &CallbackUrls,
        bank_id: Option<&str>,
        origin_ip: &str,
    ) -> Result<BankRedirect>
    where
        C: CheckoutCart + Sync + ?Sized,
        O: OrderView + Sync + ?Sized,
    {
        let order_id = order.id();
        let creditor = self.settings.creditor();

        let request = self
            .builder
            .build(cart, order, &creditor, callbacks, bank_id)
            .inspect_err(|e| {
                error!(order_id, stage = ?InitiationStage::Building, error = %e, "Invalid initiation request");
            })?;

        self.mark_started(order).await?;

        let initiated = self
            .provider
            .init_payment(&request)
            .await
            .map_err(into_provider_error)
            .inspect_err(|e| {
                error!(order_id, stage = ?InitiationStage::Submitted, error = %e, "Provider rejected payment");
            })?;
        if initiated.confirm_link.trim().is_empty() {
            error!(order_id, payment_id = %initiated.id, "Provider response lacks a confirm link");
            return Err(PaymentError::ProviderError(
                "Initiation response has no confirm link".to_string(),
            ));
        }
        info!(order_id, payment_id = %initiated.id, stage = ?InitiationStage::Submitted, "Payment initiated");

        let record = PaymentRecord::new(order_id, initiated.id.clone(), origin_ip);
        self.records.put(record).await.inspect_err(|e| {
            error!(order_id, payment_id = %initiated.id, stage = ?InitiationStage::Recorded, error = %e, "Failed to record payment");
        })?;

        info!(order_id, payment_id = %initiated.id, stage = ?InitiationStage::Redirected, "Redirecting shopper to bank");
        Ok(BankRedirect {
            payment_id: initiated.id,
            confirm_link: initiated.confirm_link,
        })
    }

    async fn mark_started<O>(&self, order: &O) -> Result<()>
    where
        O: OrderView + Sync + ?Sized,
    {
        let Some(started) = self.settings.order_states.started else {
            return Ok(());
        };
        let current = order.current_state_id();
        if current == Some(started) {
            return Ok(());
        }

        let order_id = order.id();
        match self.orders.transition(order_id, current, started).await {
            Ok(()) => {
                info!(order_id, to = %started, "Order marked as payment started");
                Ok(())
            }
            Err(PaymentError::StateConflict { order_id }) => {
                warn!(order_id, "Order state moved before initiation, leaving it as is");
                Ok(())
            }
            Err(e) => {
                error!(order_id, stage = ?InitiationStage::Building, error = %e, "Failed to mark order as started");
                Err(e)
            }
        }
    }
}

fn into_provider_error(err: PaymentError) -> PaymentError {
    match err {
        PaymentError::ProviderError(_) => err,
        other => PaymentError::ProviderError(other.to_string()),
    }
}
