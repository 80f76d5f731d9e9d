//! CSV adapters for the batch reconciliation tool.

pub mod outcome_writer;
pub mod reader;
