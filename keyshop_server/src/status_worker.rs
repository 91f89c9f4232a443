use std::{sync::Arc, time::Duration};

use keyshop_engine::{traits::StatusSources, StatusAggregator};
use log::*;
use tokio::task::JoinHandle;

/// Starts the status refresh worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// The first tick fires straight away, so the cache is warm before the first request. The aggregator's TTL still
/// applies, so the worker never adds more than one fan-out per TTL window. Must be called from within the actix
/// runtime.
pub fn start_status_worker<S>(aggregator: Arc<StatusAggregator<S>>, interval: Duration) -> JoinHandle<()>
where S: StatusSources + 'static {
    actix_web::rt::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        info!("🕰️ Status refresh worker started. Refreshing every {}s", interval.as_secs());
        loop {
            timer.tick().await;
            debug!("🕰️ Running status refresh job");
            if aggregator.refresh().await {
                let stale = aggregator.read().await.stale_fields();
                if stale.is_empty() {
                    info!("🕰️ Status snapshot refreshed");
                } else {
                    let names = stale.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ");
                    warn!("🕰️ Status snapshot refreshed, but {names} could not be fetched");
                }
            }
        }
    })
}
