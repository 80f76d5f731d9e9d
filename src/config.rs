//! Integration settings.
//!
//! Everything the checkout core reads from the merchant's configuration is
//! gathered in [`Settings`] and handed to the components at construction.

use crate::domain::order::{OrderStateId, OrderStateTarget};
use crate::domain::request::Creditor;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::path::Path;

/// Currencies the provider settles in.
pub const SUPPORTED_CURRENCIES: &[&str] = &["EUR"];
/// Shop countries the integration can be enabled in.
pub const SUPPORTED_COUNTRIES: &[&str] = &["LT", "LV", "EE"];

/// Local order-state ids for each canonical payment state.
///
/// A missing entry means "leave the order alone" for that state.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderStateMap {
    pub started: Option<OrderStateId>,
    pub pending: Option<OrderStateId>,
    pub completed: Option<OrderStateId>,
    pub failed: Option<OrderStateId>,
}

impl OrderStateMap {
    pub fn get(&self, target: OrderStateTarget) -> Option<OrderStateId> {
        match target {
            OrderStateTarget::Started => self.started,
            OrderStateTarget::Pending => self.pending,
            OrderStateTarget::Completed => self.completed,
            OrderStateTarget::Failed => self.failed,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub creditor_name: String,
    /// IBAN of the merchant account receiving the funds.
    pub creditor_account: String,
    pub order_states: OrderStateMap,
    /// `None` means the merchant never chose; the provider redirect is used.
    pub redirect_preferred: Option<bool>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PaymentError::ConfigError(format!("Invalid settings: {}", e)))
    }

    /// Loads and validates settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(PaymentError::ConfigError("Client ID is required.".to_string()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(PaymentError::ConfigError(
                "Client Secret is required.".to_string(),
            ));
        }
        if self.creditor_name.trim().is_empty() {
            return Err(PaymentError::ConfigError(
                "Creditor Name is required.".to_string(),
            ));
        }
        if self.creditor_account.trim().is_empty() {
            return Err(PaymentError::ConfigError(
                "Creditor Account is required.".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the payment method may be offered to shoppers at all.
    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn creditor(&self) -> Creditor {
        Creditor::new(self.creditor_name.clone(), self.creditor_account.clone())
    }

    pub fn supports_currency(currency: &str) -> bool {
        SUPPORTED_CURRENCIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency))
    }

    pub fn supports_country(country: &str) -> bool {
        SUPPORTED_COUNTRIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }
}

/// How a host installer should create one of the integration's order states.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStateDefinition {
    pub target: OrderStateTarget,
    pub name: &'static str,
    pub color: &'static str,
    pub paid: bool,
}

pub fn default_order_states() -> [OrderStateDefinition; 4] {
    [
        OrderStateDefinition {
            target: OrderStateTarget::Started,
            name: "Payment Started",
            color: "Lavender",
            paid: false,
        },
        OrderStateDefinition {
            target: OrderStateTarget::Pending,
            name: "Payment Pending",
            color: "Orchid",
            paid: false,
        },
        OrderStateDefinition {
            target: OrderStateTarget::Completed,
            name: "Payment Completed",
            color: "LimeGreen",
            paid: true,
        },
        OrderStateDefinition {
            target: OrderStateTarget::Failed,
            name: "Payment Failed",
            color: "OrangeRed",
            paid: false,
        },
    ]
}
