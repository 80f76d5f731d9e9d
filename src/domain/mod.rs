//! Domain types and the pure decision logic of the checkout integration.

pub mod order;
pub mod payment;
pub mod ports;
pub mod request;
pub mod status;
