use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Upstream source is unavailable. {0}")]
    Unavailable(String),
    #[error("Key {0} is not set")]
    MissingKey(String),
    #[error("Could not parse upstream value. {0}")]
    Parse(String),
    #[error("Timed out after {0} ms")]
    Timeout(u128),
}

/// A fast key-value store holding values the trading bot publishes.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn fetch_value(&self, key: &str) -> Result<Option<String>, SourceError>;
}

/// Counters computed from the document store.
#[allow(async_fn_in_trait)]
pub trait StatusCounters {
    /// Legacy orders whose trade has been completed by the bot.
    async fn count_traded_orders(&self) -> Result<i64, SourceError>;
    /// Orders that have received a settlement from the payment gateway.
    async fn count_settled_orders(&self) -> Result<i64, SourceError>;
    /// Sum of the counts in every user's traded transaction history.
    async fn sum_user_traded_counts(&self) -> Result<i64, SourceError>;
    /// Sum of the counts of traded entries in the standalone transactions collection.
    async fn sum_traded_transactions(&self) -> Result<i64, SourceError>;
}

#[allow(async_fn_in_trait)]
pub trait MarketPriceSource {
    /// The lowest ask on the public market, in integer minor units.
    async fn lowest_sell_order(&self) -> Result<i64, SourceError>;
}

/// The five upstream reads that make up a status snapshot.
///
/// Each read is independent and may fail on its own; the aggregator decides what a failure means for the snapshot.
#[allow(async_fn_in_trait)]
pub trait StatusSources {
    async fn fetch_price(&self) -> Result<i64, SourceError>;
    async fn fetch_stock(&self) -> Result<i64, SourceError>;
    async fn fetch_order_count(&self) -> Result<i64, SourceError>;
    async fn fetch_market_price(&self) -> Result<i64, SourceError>;
    async fn fetch_transaction_total(&self) -> Result<i64, SourceError>;
}
