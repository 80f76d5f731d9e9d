use bank_redirect::application::engine::CheckoutEngine;
use bank_redirect::config::Settings;
use bank_redirect::domain::order::OrderSnapshot;
use bank_redirect::domain::payment::{PaymentId, PaymentRecord};
use bank_redirect::domain::ports::{OrderRepository, PaymentRecordStore, PaymentRecordStoreBox};
use bank_redirect::error::PaymentError;
use bank_redirect::infrastructure::in_memory::{InMemoryOrderRepository, InMemoryPaymentRecordStore};
use bank_redirect::infrastructure::report::StatusReportProvider;
use bank_redirect::interfaces::csv::outcome_writer::{ConfirmationRow, OutcomeWriter};
use bank_redirect::interfaces::csv::reader::{CsvReader, StatusRow};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Replays a provider status export through the payment confirmation flow.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider status export CSV (payment_id, group)
    input: PathBuf,

    /// Integration settings (JSON)
    #[arg(long)]
    config: PathBuf,

    /// Host orders CSV (order, state, secure_key)
    #[arg(long)]
    orders: PathBuf,

    /// Payment records CSV (order, payment_id, ip_address) to import first
    #[arg(long)]
    records: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).into_diagnostic()?;
    let records = open_record_store(cli.db_path.as_deref())?;

    if let Some(path) = &cli.records {
        let file = File::open(path).into_diagnostic()?;
        for row in CsvReader::new(file).rows::<PaymentRecord>() {
            match row {
                Ok(record) => match records.put(record).await {
                    Ok(()) => {}
                    Err(PaymentError::DuplicateKey(id)) => {
                        warn!(payment_id = %id, "Payment already recorded, skipping");
                    }
                    Err(e) => return Err(e).into_diagnostic(),
                },
                Err(e) => error!(error = %e, "Error reading payment record"),
            }
        }
    }

    let orders = InMemoryOrderRepository::new();
    let file = File::open(&cli.orders).into_diagnostic()?;
    for row in CsvReader::new(file).rows::<OrderSnapshot>() {
        match row {
            Ok(order) => orders.insert(order).await,
            Err(e) => error!(error = %e, "Error reading order"),
        }
    }

    // Later rows for the same payment win; each payment is confirmed once.
    let mut provider = StatusReportProvider::new();
    let mut replay: Vec<PaymentId> = Vec::new();
    let mut seen: HashSet<PaymentId> = HashSet::new();
    let file = File::open(&cli.input).into_diagnostic()?;
    for row in CsvReader::new(file).rows::<StatusRow>() {
        match row {
            Ok(status) => {
                if seen.insert(status.payment_id.clone()) {
                    replay.push(status.payment_id.clone());
                }
                provider.report(status.payment_id, status.group);
            }
            Err(e) => error!(error = %e, "Error reading payment status"),
        }
    }

    let engine = CheckoutEngine::new(
        settings,
        Box::new(provider),
        records,
        Box::new(orders.clone()),
    );

    let mut rows = Vec::with_capacity(replay.len());
    for payment_id in replay {
        let outcome = engine.confirm(Some(payment_id.as_str())).await;
        let order = engine
            .payment_record(&payment_id)
            .await
            .into_diagnostic()?
            .map(|record| record.order_id);
        let state = match order {
            Some(order_id) => orders
                .find(order_id)
                .await
                .into_diagnostic()?
                .and_then(|o| o.current_state),
            None => None,
        };
        rows.push(ConfirmationRow {
            payment_id: payment_id.to_string(),
            outcome: outcome.as_str(),
            order,
            state,
        });
    }
    info!(confirmations = rows.len(), "Replay finished");

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_rows(rows).into_diagnostic()?;

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_record_store(db_path: Option<&Path>) -> Result<PaymentRecordStoreBox> {
    use bank_redirect::infrastructure::rocksdb::RocksDBStore;

    let store: PaymentRecordStoreBox = match db_path {
        // Use persistent storage (RocksDB)
        Some(path) => Box::new(RocksDBStore::open(path).into_diagnostic()?),
        None => Box::new(InMemoryPaymentRecordStore::new()),
    };
    Ok(store)
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_record_store(db_path: Option<&Path>) -> Result<PaymentRecordStoreBox> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryPaymentRecordStore::new()))
}
