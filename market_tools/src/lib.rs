//! Typed client for the public market-data endpoints the storefront quotes prices from.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::SteamMarketApi;
pub use config::{MarketConfig, DEFAULT_HISTOGRAM_URL};
pub use data_objects::OrderHistogram;
pub use error::MarketApiError;
