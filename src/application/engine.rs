use crate::config::Settings;
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::{OrderRepositoryBox, PaymentProviderBox, PaymentRecordStoreBox};
use crate::domain::request::PaymentInitiationRequestBuilder;
use crate::domain::status::{OrderStateReconciler, PaymentStatusMapper};
use crate::error::Result;
use tracing::{debug, warn};
use url::Url;

/// The entry point for checkout payments.
///
/// `CheckoutEngine` owns the settings, the provider client and the storage
/// ports. Each call handles one shopper request from start to finish; there
/// is no background work.
pub struct CheckoutEngine {
    pub(crate) settings: Settings,
    pub(crate) provider: PaymentProviderBox,
    pub(crate) records: PaymentRecordStoreBox,
    pub(crate) orders: OrderRepositoryBox,
    pub(crate) builder: PaymentInitiationRequestBuilder,
    pub(crate) reconciler: OrderStateReconciler,
}

/// A bank button shown at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOption {
    pub id: String,
    pub title: String,
    pub logo: String,
    /// Initiation URL for this bank.
    pub action: String,
}

impl CheckoutEngine {
    /// Creates a new `CheckoutEngine`.
    ///
    /// # Arguments
    ///
    /// * `settings` - Merchant configuration.
    /// * `provider` - Client for the payment provider API.
    /// * `records` - Store for payment records.
    /// * `orders` - Access to host orders.
    pub fn new(
        settings: Settings,
        provider: PaymentProviderBox,
        records: PaymentRecordStoreBox,
        orders: OrderRepositoryBox,
    ) -> Self {
        let builder = PaymentInitiationRequestBuilder::new(settings.redirect_preferred);
        let reconciler =
            OrderStateReconciler::new(PaymentStatusMapper::new(settings.order_states.clone()));
        Self {
            settings,
            provider,
            records,
            orders,
            builder,
            reconciler,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Looks up the record written when a payment was initiated.
    pub async fn payment_record(&self, payment_id: &PaymentId) -> Result<Option<PaymentRecord>> {
        self.records.find_by_payment_id(payment_id).await
    }

    /// Lists the banks a shopper can pay with.
    ///
    /// Returns nothing when the currency or country is unsupported, or the
    /// integration is not configured. Provider failures are logged and also
    /// yield nothing, so checkout keeps working without the bank list.
    ///
    /// `action_base` must be an absolute URL. The bank id is appended to its
    /// query as `id`, after any parameters it already carries.
    pub async fn payment_options(
        &self,
        currency: &str,
        country: &str,
        action_base: &str,
    ) -> Vec<PaymentOption> {
        if !Settings::supports_currency(currency) {
            debug!(currency, "Currency not supported, hiding payment options");
            return Vec::new();
        }
        if !Settings::supports_country(country) {
            debug!(country, "Country not supported, hiding payment options");
            return Vec::new();
        }
        if !self.settings.is_configured() {
            debug!("Integration not configured, hiding payment options");
            return Vec::new();
        }
        let action = match Url::parse(action_base) {
            Ok(url) => url,
            Err(e) => {
                warn!(action_base, error = %e, "Invalid payment action URL");
                return Vec::new();
            }
        };

        match self.provider.get_banks(country).await {
            Ok(banks) => banks
                .into_iter()
                .map(|bank| {
                    let mut link = action.clone();
                    link.query_pairs_mut().append_pair("id", &bank.id);
                    PaymentOption {
                        action: link.to_string(),
                        id: bank.id,
                        title: bank.name,
                        logo: bank.image_uri,
                    }
                })
                .collect(),
            Err(e) => {
                warn!(country, error = %e, "Failed to list banks");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{ScriptedProvider, engine_with, settings};
    use crate::domain::payment::Bank;
    use crate::infrastructure::in_memory::InMemoryPaymentRecordStore;

    fn swedbank() -> Bank {
        Bank {
            id: "SWEDBANK_LT".to_string(),
            name: "Swedbank".to_string(),
            image_uri: "https://img.test/swedbank.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_payment_options_lists_banks() {
        let engine = engine_with(
            settings(),
            ScriptedProvider::with_banks(vec![swedbank()]),
            InMemoryPaymentRecordStore::new(),
        );

        let options = engine
            .payment_options("EUR", "LT", "https://shop.test/redirect")
            .await;

        assert_eq!(
            options,
            vec![PaymentOption {
                id: "SWEDBANK_LT".to_string(),
                title: "Swedbank".to_string(),
                logo: "https://img.test/swedbank.png".to_string(),
                action: "https://shop.test/redirect?id=SWEDBANK_LT".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_payment_options_extend_existing_query() {
        let bank = Bank {
            id: "A&B LT".to_string(),
            ..swedbank()
        };
        let engine = engine_with(
            settings(),
            ScriptedProvider::with_banks(vec![bank]),
            InMemoryPaymentRecordStore::new(),
        );

        let options = engine
            .payment_options(
                "EUR",
                "LT",
                "https://shop.test/index.php?fc=module&module=bankredirect&controller=redirect",
            )
            .await;

        assert_eq!(options.len(), 1);
        assert_eq!(
            options[0].action,
            "https://shop.test/index.php?fc=module&module=bankredirect&controller=redirect&id=A%26B+LT"
        );
        let link = Url::parse(&options[0].action).unwrap();
        let id = link.query_pairs().find(|(k, _)| *k == "id").map(|(_, v)| v.into_owned());
        assert_eq!(id.as_deref(), Some("A&B LT"));
    }

    #[tokio::test]
    async fn test_payment_options_hidden_for_relative_action() {
        let engine = engine_with(
            settings(),
            ScriptedProvider::with_banks(vec![swedbank()]),
            InMemoryPaymentRecordStore::new(),
        );
        assert!(engine.payment_options("EUR", "LT", "/redirect").await.is_empty());
    }

    #[tokio::test]
    async fn test_payment_options_hidden_for_unsupported_country() {
        let engine = engine_with(
            settings(),
            ScriptedProvider::with_banks(vec![swedbank()]),
            InMemoryPaymentRecordStore::new(),
        );
        assert!(
            engine
                .payment_options("EUR", "DE", "https://shop.test/redirect")
                .await
                .is_empty()
        );
        assert_eq!(
            engine
                .payment_options("EUR", "lv", "https://shop.test/redirect")
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_payment_options_hidden_for_unsupported_currency() {
        let engine = engine_with(
            settings(),
            ScriptedProvider::with_banks(vec![swedbank()]),
            InMemoryPaymentRecordStore::new(),
        );
        assert!(
            engine
                .payment_options("USD", "LT", "https://shop.test/redirect")
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_payment_options_hidden_when_unconfigured() {
        let mut unconfigured = settings();
        unconfigured.creditor_account.clear();
        let engine = engine_with(
            unconfigured,
            ScriptedProvider::with_banks(vec![swedbank()]),
            InMemoryPaymentRecordStore::new(),
        );
        assert!(
            engine
                .payment_options("EUR", "LT", "https://shop.test/redirect")
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_payment_options_survive_provider_failure() {
        let engine = engine_with(
            settings(),
            ScriptedProvider::failing(),
            InMemoryPaymentRecordStore::new(),
        );
        assert!(
            engine
                .payment_options("EUR", "LT", "https://shop.test/redirect")
                .await
                .is_empty()
        );
    }
}
