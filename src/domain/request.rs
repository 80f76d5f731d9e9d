use super::order::{CheckoutCart, OrderView};
use crate::error::{PaymentError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// The merchant account receiving the funds.
#[derive(Debug, Clone, PartialEq)]
pub struct Creditor {
    pub name: String,
    pub iban: String,
}

impl Creditor {
    pub fn new(name: impl Into<String>, iban: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iban: iban.into(),
        }
    }
}

/// Where the provider sends the shopper back and where it posts webhooks.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackUrls {
    pub redirect_url: String,
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditorAccount {
    pub iban: String,
}

/// Outbound payload starting a bank redirect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentInitiationRequest {
    #[serde(rename = "redirectPreferred")]
    pub redirect_preferred: bool,
    #[serde(rename = "Redirect-URL")]
    pub redirect_url: String,
    #[serde(rename = "Webhook-URL")]
    pub webhook_url: String,
    #[serde(rename = "endToEndId")]
    pub end_to_end_id: String,
    #[serde(rename = "informationUnstructured")]
    pub information_unstructured: String,
    #[serde(rename = "currencyCode")]
    pub currency_code: String,
    pub amount: String,
    #[serde(rename = "creditorName")]
    pub creditor_name: String,
    #[serde(rename = "creditorAccount")]
    pub creditor_account: CreditorAccount,
    /// Left out entirely when the shopper did not pick a bank.
    #[serde(rename = "bankId", skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentInitiationRequestBuilder {
    redirect_preferred: Option<bool>,
}

impl PaymentInitiationRequestBuilder {
    pub fn new(redirect_preferred: Option<bool>) -> Self {
        Self { redirect_preferred }
    }

    pub fn build<C, O>(
        &self,
        cart: &C,
        order: &O,
        creditor: &Creditor,
        callbacks: &CallbackUrls,
        bank_id: Option<&str>,
    ) -> Result<PaymentInitiationRequest>
    where
        C: CheckoutCart + ?Sized,
        O: OrderView + ?Sized,
    {
        let currency_code = cart.currency_code().trim();
        if currency_code.is_empty() {
            return Err(PaymentError::InvalidInput(
                "Currency code is required".to_string(),
            ));
        }
        if creditor.iban.trim().is_empty() {
            return Err(PaymentError::InvalidInput(
                "Creditor IBAN is required".to_string(),
            ));
        }

        let order_id = order.id();
        Ok(PaymentInitiationRequest {
            redirect_preferred: self.redirect_preferred.unwrap_or(true),
            redirect_url: callbacks.redirect_url.clone(),
            webhook_url: callbacks.webhook_url.clone(),
            end_to_end_id: order_id.to_string(),
            information_unstructured: format!("Order {}", order_id),
            currency_code: currency_code.to_string(),
            amount: format_amount(cart.total_amount())?,
            creditor_name: creditor.name.clone(),
            creditor_account: CreditorAccount {
                iban: creditor.iban.clone(),
            },
            bank_id: bank_id.map(str::to_string),
        })
    }
}

/// Formats a positive amount with exactly two fractional digits.
///
/// Half-way values round away from zero, so `0.005` becomes `0.01`.
pub fn format_amount(amount: Decimal) -> Result<String> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidInput(
            "Amount must be positive".to_string(),
        ));
    }
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Ok(rounded.to_string())
}
