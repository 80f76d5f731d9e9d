#![allow(dead_code)]

use async_trait::async_trait;
use bank_redirect::config::Settings;
use bank_redirect::domain::payment::{
    Bank, InitiatedPayment, PaymentId, PaymentStatusReport, StatusQuery,
};
use bank_redirect::domain::ports::PaymentProvider;
use bank_redirect::domain::request::PaymentInitiationRequest;
use bank_redirect::error::{PaymentError, Result};
use std::collections::HashMap;
use std::io::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const FIXTURE_CONFIG: &str = "tests/fixtures/config.json";

pub fn settings() -> Settings {
    Settings::load(FIXTURE_CONFIG).expect("fixture settings")
}

/// Writes a CSV file with the given header and rows.
pub fn write_csv(path: &Path, header: &[&str], rows: &[&[&str]]) -> std::result::Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(*row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A provider that hands out sequential payment ids and reports whatever
/// status the test sets.
#[derive(Clone, Default)]
pub struct FakeProvider {
    next_id: Arc<Mutex<u32>>,
    statuses: Arc<Mutex<HashMap<String, String>>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, payment_id: &PaymentId, group: &str) {
        self.statuses
            .lock()
            .unwrap()
            .insert(payment_id.to_string(), group.to_string());
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn init_payment(&self, request: &PaymentInitiationRequest) -> Result<InitiatedPayment> {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = format!("PAY-{}-{}", request.end_to_end_id, *next);
        Ok(InitiatedPayment {
            confirm_link: format!("https://bank.test/confirm/{}", id),
            id: PaymentId::new(id)?,
        })
    }

    async fn get_payment_status(&self, query: &StatusQuery) -> Result<PaymentStatusReport> {
        let statuses = self.statuses.lock().unwrap();
        statuses
            .get(query.payment_id.as_str())
            .map(|group| PaymentStatusReport {
                group: group.clone(),
            })
            .ok_or_else(|| PaymentError::ProviderError("unknown payment".to_string()))
    }

    async fn get_banks(&self, _country_code: &str) -> Result<Vec<Bank>> {
        Ok(vec![Bank {
            id: "SEB_LT".to_string(),
            name: "SEB".to_string(),
            image_uri: "https://img.test/seb.png".to_string(),
        }])
    }
}
