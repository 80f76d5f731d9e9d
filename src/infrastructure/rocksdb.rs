use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentRecordStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing payment records.
pub const CF_PAYMENT_RECORDS: &str = "payment_records";

/// A persistent payment record store using RocksDB.
///
/// Records are JSON values keyed by the payment id bytes. Writes are
/// serialized through a mutex so the existence check and the put of
/// [`PaymentRecordStore::put`] cannot interleave within the process.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "payment_records" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_records = ColumnFamilyDescriptor::new(CF_PAYMENT_RECORDS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_records])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn records_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_PAYMENT_RECORDS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Payment records column family not found",
            )))
        })
    }
}

#[async_trait]
impl PaymentRecordStore for RocksDBStore {
    async fn put(&self, record: PaymentRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let cf = self.records_cf()?;
        let key = record.payment_id.as_str().as_bytes();

        if self.db.get_pinned_cf(cf, key)?.is_some() {
            return Err(PaymentError::DuplicateKey(record.payment_id.to_string()));
        }

        let value = serde_json::to_vec(&record).map_err(|e| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, key, value)?;

        Ok(())
    }

    async fn find_by_payment_id(&self, payment_id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let cf = self.records_cf()?;
        let result = self.db.get_cf(cf, payment_id.as_str().as_bytes())?;

        if let Some(bytes) = result {
            let record = serde_json::from_slice(&bytes).map_err(|e| {
                PaymentError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Deserialization error: {}", e),
                )))
            })?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }
}
