use log::*;
use redis::{AsyncCommands, Client};

use crate::traits::{KeyValueStore, SourceError, StoreError};

/// Redis-backed [`KeyValueStore`].
///
/// A multiplexed connection is opened per lookup, so the store starts (and keeps serving stale status values) even
/// when Redis is down.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    /// Fails only if the URL itself is invalid. No connection is attempted.
    pub fn new_with_url(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(|e| StoreError::Configuration(format!("Invalid Redis URL. {e}")))?;
        Ok(Self { client })
    }

    pub async fn ping(&self) -> Result<(), SourceError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let pong = redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        trace!("🗃️ Redis replied {pong}");
        Ok(())
    }
}

impl KeyValueStore for RedisStore {
    async fn fetch_value(&self, key: &str) -> Result<Option<String>, SourceError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let value: Option<String> = conn.get(key).await.map_err(|e| SourceError::Unavailable(e.to_string()))?;
        trace!("🗃️ Redis {key} => {value:?}");
        Ok(value)
    }
}
