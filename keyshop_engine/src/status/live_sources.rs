use log::*;

use crate::traits::{KeyValueStore, MarketPriceSource, SourceError, StatusCounters, StatusSources};

pub const DEFAULT_PRICE_KEY: &str = "REDIS_PRICE";
pub const DEFAULT_STOCK_KEY: &str = "REDIS_STOCK";

/// The production status sources: price and stock from the key-value store the bot publishes to, counters from the
/// document store and the lowest ask from the public market.
pub struct LiveSources<K, D, M> {
    kv: K,
    db: D,
    market: M,
    price_key: String,
    stock_key: String,
}

impl<K, D, M> LiveSources<K, D, M> {
    pub fn new(kv: K, db: D, market: M) -> Self {
        Self { kv, db, market, price_key: DEFAULT_PRICE_KEY.to_string(), stock_key: DEFAULT_STOCK_KEY.to_string() }
    }

    pub fn with_keys<S: Into<String>>(mut self, price_key: S, stock_key: S) -> Self {
        self.price_key = price_key.into();
        self.stock_key = stock_key.into();
        self
    }
}

impl<K, D, M> LiveSources<K, D, M>
where K: KeyValueStore
{
    async fn fetch_integer(&self, key: &str) -> Result<i64, SourceError> {
        let value = self.kv.fetch_value(key).await?.ok_or_else(|| SourceError::MissingKey(key.to_string()))?;
        value.trim().parse::<i64>().map_err(|e| SourceError::Parse(format!("{key}={value}: {e}")))
    }
}

impl<K, D, M> StatusSources for LiveSources<K, D, M>
where
    K: KeyValueStore,
    D: StatusCounters,
    M: MarketPriceSource,
{
    async fn fetch_price(&self) -> Result<i64, SourceError> {
        self.fetch_integer(&self.price_key).await
    }

    async fn fetch_stock(&self) -> Result<i64, SourceError> {
        self.fetch_integer(&self.stock_key).await
    }

    async fn fetch_order_count(&self) -> Result<i64, SourceError> {
        let (traded, settled) = tokio::join!(self.db.count_traded_orders(), self.db.count_settled_orders());
        Ok(traded?.saturating_add(settled?))
    }

    async fn fetch_market_price(&self) -> Result<i64, SourceError> {
        self.market.lowest_sell_order().await
    }

    /// Sub-totals that cannot be read count as zero. This fetch does not fail.
    async fn fetch_transaction_total(&self) -> Result<i64, SourceError> {
        let (users, transactions) =
            tokio::join!(self.db.sum_user_traded_counts(), self.db.sum_traded_transactions());
        let users = users.unwrap_or_else(|e| {
            warn!("📊️ Could not sum user transactions. {e}");
            0
        });
        let transactions = transactions.unwrap_or_else(|e| {
            warn!("📊️ Could not sum the transactions collection. {e}");
            0
        });
        Ok(users.saturating_add(transactions))
    }
}
