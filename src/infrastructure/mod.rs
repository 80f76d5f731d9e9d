//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod report;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
