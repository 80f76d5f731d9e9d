//! Application layer orchestrating the checkout flows.
//!
//! [`engine::CheckoutEngine`] owns the provider client and the storage ports.
//! Payment initiation lives in [`initiation`], confirmation callbacks in
//! [`confirmation`]. Every call is a single request/response cycle.

pub mod confirmation;
pub mod engine;
pub mod initiation;
