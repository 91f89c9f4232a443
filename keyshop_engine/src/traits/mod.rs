//! Backend traits for the storefront engine.
//!
//! The engine never talks to a concrete store directly. The APIs are generic over these traits so that the MongoDB and
//! Redis backends in [`crate::db`] can be swapped for in-memory fakes in tests.
mod order_store;
mod status_sources;

pub use order_store::{OrderStore, StoreError};
pub use status_sources::{KeyValueStore, MarketPriceSource, SourceError, StatusCounters, StatusSources};
