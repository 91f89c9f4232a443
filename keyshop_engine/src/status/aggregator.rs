use std::{future::Future, time::Duration};

use chrono::Utc;
use log::*;
use tokio::sync::Mutex;

use super::snapshot::{StatusField, StatusSnapshot};
use crate::traits::{SourceError, StatusSources};

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct AggregatorOptions {
    /// A snapshot younger than this is served as is.
    pub ttl: Duration,
    /// Upper bound on each individual fetch. A fetch that runs over counts as failed.
    pub fetch_timeout: Duration,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self { ttl: DEFAULT_STATUS_TTL, fetch_timeout: DEFAULT_FETCH_TIMEOUT }
    }
}

/// Holds the shared status snapshot and refreshes it from `S`.
///
/// The lock is held for the whole fan-out, so callers that arrive while a refresh is running wait for it and then find
/// a fresh snapshot: there is at most one fan-out per TTL window. Dropping a `refresh` future part way through
/// cancels the outstanding fetches and leaves the previous snapshot in place.
pub struct StatusAggregator<S> {
    sources: S,
    snapshot: Mutex<StatusSnapshot>,
    options: AggregatorOptions,
}

impl<S> StatusAggregator<S>
where S: StatusSources
{
    pub fn new(sources: S, options: AggregatorOptions) -> Self {
        Self { sources, snapshot: Mutex::new(StatusSnapshot::default()), options }
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }

    /// Refreshes the snapshot if it is older than the TTL. Returns true if the sources were queried.
    pub async fn refresh(&self) -> bool {
        self.refresh_at(Utc::now().timestamp()).await
    }

    /// As [`Self::refresh`], with `now` (Unix seconds) standing in for the wall clock. The new snapshot is stamped with
    /// `now`.
    pub async fn refresh_at(&self, now: i64) -> bool {
        let mut snapshot = self.snapshot.lock().await;
        let ttl = i64::try_from(self.options.ttl.as_secs()).unwrap_or(i64::MAX);
        if now.saturating_sub(snapshot.updated_at) < ttl {
            trace!("📊️ Status snapshot from {} is still fresh", snapshot.updated_at);
            return false;
        }
        debug!("📊️ Refreshing status snapshot");
        let timeout = self.options.fetch_timeout;
        let (price, stock, order_count, market_price, transaction_total) = tokio::join!(
            fetch_with_timeout(StatusField::Price, timeout, self.sources.fetch_price()),
            fetch_with_timeout(StatusField::Stock, timeout, self.sources.fetch_stock()),
            fetch_with_timeout(StatusField::OrderCount, timeout, self.sources.fetch_order_count()),
            fetch_with_timeout(StatusField::MarketPrice, timeout, self.sources.fetch_market_price()),
            fetch_with_timeout(StatusField::TransactionTotal, timeout, self.sources.fetch_transaction_total()),
        );
        let refreshed = StatusSnapshot {
            price: snapshot.price.carry(price),
            stock: snapshot.stock.carry(stock),
            order_count: snapshot.order_count.carry(order_count),
            market_price: snapshot.market_price.carry(market_price),
            transaction_total: snapshot.transaction_total.carry(transaction_total),
            updated_at: now,
        };
        let stale = refreshed.stale_fields();
        if !stale.is_empty() {
            let names = stale.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ");
            warn!("📊️ Status refreshed with stale fields: {names}");
        }
        *snapshot = refreshed;
        true
    }

    /// The current snapshot. Does not trigger a refresh.
    pub async fn read(&self) -> StatusSnapshot {
        self.snapshot.lock().await.clone()
    }
}

async fn fetch_with_timeout<F>(field: StatusField, timeout: Duration, fetch: F) -> Option<i64>
where F: Future<Output = Result<i64, SourceError>> {
    match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!("📊️ Could not fetch {field}. {e}");
            None
        },
        Err(_) => {
            let e = SourceError::Timeout(timeout.as_millis());
            warn!("📊️ Could not fetch {field}. {e}");
            None
        },
    }
}
