use std::time::Duration;

use log::*;

pub const DEFAULT_HISTOGRAM_URL: &str = "https://steamcommunity.com/market/itemordershistogram?country=TW&language=tchinese&currency=30&item_nameid=1&two_factor=0";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// The item order histogram endpoint, including its query string.
    pub histogram_url: String,
    /// Overall request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self { histogram_url: DEFAULT_HISTOGRAM_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl MarketConfig {
    pub fn new_from_env_or_default() -> Self {
        let histogram_url = std::env::var("KSG_MARKET_URL").unwrap_or_else(|_| {
            info!("🪛️ KSG_MARKET_URL not set, using the Steam community histogram endpoint");
            DEFAULT_HISTOGRAM_URL.to_string()
        });
        let timeout = std::env::var("KSG_MARKET_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for KSG_MARKET_TIMEOUT. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { histogram_url, timeout }
    }
}
