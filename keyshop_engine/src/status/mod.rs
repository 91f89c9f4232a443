//! The live status counters shown on the storefront.
//!
//! [`StatusAggregator`] owns a single [`StatusSnapshot`] behind an async lock and refreshes it from a set of
//! [`StatusSources`](crate::traits::StatusSources) at most once per TTL window. [`LiveSources`] is the production set of
//! sources, built from the key-value store, the document store and the market price feed.
mod aggregator;
mod live_sources;
mod snapshot;

pub use aggregator::{AggregatorOptions, StatusAggregator, DEFAULT_FETCH_TIMEOUT, DEFAULT_STATUS_TTL};
pub use live_sources::{LiveSources, DEFAULT_PRICE_KEY, DEFAULT_STOCK_KEY};
pub use snapshot::{Reading, StatusField, StatusSnapshot};
