use crate::domain::payment::PaymentId;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;

/// One row of a provider status export.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct StatusRow {
    pub payment_id: PaymentId,
    pub group: String,
}

/// Reads typed rows from a CSV source.
///
/// This reader wraps `csv::Reader` and handles whitespace trimming and
/// flexible record lengths automatically.
pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CsvReader<R> {
    /// Creates a new `CsvReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn rows<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderSnapshot;
    use crate::domain::payment::PaymentRecord;

    #[test]
    fn test_reader_status_rows() {
        let data = "payment_id, group\nP-1, completed\nP-2, pending";
        let rows: Vec<Result<StatusRow>> = CsvReader::new(data.as_bytes()).rows().collect();

        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.payment_id.as_str(), "P-1");
        assert_eq!(first.group, "completed");
    }

    #[test]
    fn test_reader_blank_payment_id_is_error() {
        let data = "payment_id, group\n , completed\nP-2, failed";
        let rows: Vec<Result<StatusRow>> = CsvReader::new(data.as_bytes()).rows().collect();

        assert!(rows[0].is_err());
        assert!(rows[1].is_ok());
    }

    #[test]
    fn test_reader_records_and_orders() {
        let records = "order, payment_id, ip_address\n5, P-5, 10.0.0.9";
        let record: PaymentRecord = CsvReader::new(records.as_bytes())
            .rows()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(record.order_id, 5);
        assert_eq!(record.origin_ip_address, "10.0.0.9");

        let orders = "order, state, secure_key\n5, 10, abc\nx, 1, abc";
        let rows: Vec<Result<OrderSnapshot>> = CsvReader::new(orders.as_bytes()).rows().collect();
        assert_eq!(rows[0].as_ref().unwrap().customer_secure_key.as_deref(), Some("abc"));
        assert!(rows[1].is_err());
    }
}
