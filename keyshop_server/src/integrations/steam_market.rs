use keyshop_engine::{
    traits::{MarketPriceSource, SourceError},
    LiveSources,
    MongoDatabase,
    RedisStore,
};
use market_tools::{MarketApiError, SteamMarketApi};

/// The status sources the server runs with.
pub type LiveStatusSources = LiveSources<RedisStore, MongoDatabase, SteamMarketPriceSource>;

/// Adapts the market client to the engine's price source trait.
#[derive(Clone)]
pub struct SteamMarketPriceSource {
    api: SteamMarketApi,
}

impl SteamMarketPriceSource {
    pub fn new(api: SteamMarketApi) -> Self {
        Self { api }
    }
}

impl MarketPriceSource for SteamMarketPriceSource {
    async fn lowest_sell_order(&self) -> Result<i64, SourceError> {
        self.api.lowest_sell_price().await.map_err(to_source_error)
    }
}

fn to_source_error(e: MarketApiError) -> SourceError {
    match e {
        MarketApiError::NoSellOrders | MarketApiError::InvalidPrice(_) | MarketApiError::JsonError(_) => {
            SourceError::Parse(e.to_string())
        },
        _ => SourceError::Unavailable(e.to_string()),
    }
}
