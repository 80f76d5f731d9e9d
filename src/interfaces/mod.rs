//! Inbound and outbound adapters.

pub mod csv;
