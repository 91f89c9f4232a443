//! Key Shop Engine
//!
//! The core of the key shop storefront: the live status counters and the payment gateway settlement flow. It knows
//! nothing about HTTP.
//!
//! The library is divided into three main sections:
//! 1. Backends ([`mod@db`]) and the traits they implement ([`mod@traits`]). MongoDB holds orders and trade history,
//!    Redis holds the price and stock the trading bot publishes. Everything above the backends is generic over the
//!    traits, so tests run against the in-memory fakes in `test_utils`.
//! 2. The status aggregator ([`mod@status`]). One shared snapshot of the storefront counters, refreshed from five
//!    independent sources at most once per TTL window. A source that fails keeps its previous value and is flagged
//!    stale.
//! 3. The public API ([`SettlementApi`] and [`OrdersApi`]). Settlement authenticates gateway callbacks and writes them
//!    onto orders; the orders API derives each order's lifecycle at read time.
pub mod db;
pub mod db_types;
pub mod helpers;
mod kse_api;
pub mod status;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use db::{CollectionNames, MongoDatabase, RedisStore};
pub use kse_api::{
    errors::{OrdersApiError, SettlementError},
    order_objects,
    orders_api::OrdersApi,
    settlement_api::SettlementApi,
};
pub use status::{AggregatorOptions, LiveSources, StatusAggregator, StatusSnapshot};
