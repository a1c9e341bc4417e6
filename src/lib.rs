//! Personal expense ledger: a transaction store persisted to a local key-value
//! store, a filter and sort engine producing derived views, and the statistics and
//! chart inputs computed from the collection.

pub mod engine;
pub mod models;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod types;
