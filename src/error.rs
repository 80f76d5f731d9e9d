use thiserror::Error;

/// The only failure text a shopper ever sees.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred. Please contact the merchant for more information.";

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Order {order_id} is no longer in the expected state")]
    StateConflict { order_id: u32 },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl PaymentError {
    /// Message safe to render on a shopper-facing page.
    ///
    /// Every variant collapses to the same text so that internal state
    /// (missing records, provider responses) never leaks out.
    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
