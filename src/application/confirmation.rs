use super::engine::CheckoutEngine;
use crate::domain::order::{OrderId, OrderSnapshot};
use crate::domain::payment::{PaymentId, StatusQuery};
use crate::domain::status::Decision;
use crate::error::{PaymentError, Result};
use tracing::{error, info, warn};

/// Where the shopper ends up after a confirmation callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationOutcome {
    /// Order detail page, addressed by order id and the customer's secure key.
    OrderDetail { order_id: OrderId, secure_key: String },
    /// The generic order page. Used when nothing can be said about the order.
    OrderPage,
    /// The generic error page.
    Error { message: &'static str },
}

impl ConfirmationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationOutcome::OrderDetail { .. } => "order_detail",
            ConfirmationOutcome::OrderPage => "order_page",
            ConfirmationOutcome::Error { .. } => "error",
        }
    }
}

impl CheckoutEngine {
    /// Handles a confirmation callback carrying a provider payment id.
    ///
    /// Never fails: lookup and provider errors are logged and turned into
    /// [`ConfirmationOutcome::Error`], which carries only the generic message.
    pub async fn confirm(&self, payment_id: Option<&str>) -> ConfirmationOutcome {
        match self.try_confirm(payment_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(payment_id = payment_id.unwrap_or_default(), error = %e, "Confirmation failed");
                ConfirmationOutcome::Error {
                    message: e.user_message(),
                }
            }
        }
    }

    async fn try_confirm(&self, payment_id: Option<&str>) -> Result<ConfirmationOutcome> {
        let payment_id = PaymentId::new(payment_id.unwrap_or_default())?;

        // Lookup
        let record = self
            .records
            .find_by_payment_id(&payment_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(format!("payment record {}", payment_id)))?;

        let Some(order) = self.orders.find(record.order_id).await? else {
            warn!(%payment_id, order_id = record.order_id, "Order not found");
            return Ok(ConfirmationOutcome::OrderPage);
        };
        let Some(secure_key) = order.customer_secure_key.clone() else {
            warn!(%payment_id, order_id = order.id, "Customer not found");
            return Ok(ConfirmationOutcome::OrderPage);
        };

        // StatusQuery
        let status = self
            .provider
            .get_payment_status(&StatusQuery::for_record(&record))
            .await?;

        // Reconcile
        let decision = self.reconciler.reconcile(&order, &status.group);
        info!(%payment_id, order_id = order.id, group = %status.group, ?decision, "Reconciled payment status");
        self.apply(&order, decision).await?;

        Ok(match decision {
            Decision::Abstain => ConfirmationOutcome::OrderPage,
            Decision::NoChange { .. } | Decision::Transition { .. } => {
                ConfirmationOutcome::OrderDetail {
                    order_id: order.id,
                    secure_key,
                }
            }
        })
    }

    async fn apply(&self, order: &OrderSnapshot, decision: Decision) -> Result<()> {
        let Decision::Transition { from, to } = decision else {
            return Ok(());
        };

        match self.orders.transition(order.id, from, to).await {
            Ok(()) => Ok(()),
            // Another delivery of the same callback moved the order first.
            Err(PaymentError::StateConflict { order_id }) => {
                warn!(order_id, to = %to, "Order state changed concurrently, skipping transition");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
