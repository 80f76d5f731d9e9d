use crate::domain::order::{OrderId, OrderStateId};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Result of replaying one confirmation.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ConfirmationRow {
    pub payment_id: String,
    pub outcome: &'static str,
    /// Empty when the payment could not be tied to an order.
    pub order: Option<OrderId>,
    /// Order state after the confirmation.
    pub state: Option<OrderStateId>,
}

pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_rows(&mut self, rows: impl IntoIterator<Item = ConfirmationRow>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
