use std::sync::Arc;

use log::*;
use reqwest::Client;

use crate::{config::MarketConfig, data_objects::OrderHistogram, MarketApiError};

#[derive(Clone)]
pub struct SteamMarketApi {
    config: MarketConfig,
    client: Arc<Client>,
}

impl SteamMarketApi {
    pub fn new(config: MarketConfig) -> Result<Self, MarketApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self) -> &str {
        self.config.histogram_url.as_str()
    }

    pub async fn fetch_histogram(&self) -> Result<OrderHistogram, MarketApiError> {
        trace!("Fetching order histogram from {}", self.url());
        let response =
            self.client.get(self.url()).send().await.map_err(|e| MarketApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            response.json::<OrderHistogram>().await.map_err(|e| MarketApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MarketApiError::RestResponseError(e.to_string()))?;
            Err(MarketApiError::QueryError { status, message })
        }
    }

    /// The lowest ask currently listed on the market, in integer minor units.
    pub async fn lowest_sell_price(&self) -> Result<i64, MarketApiError> {
        let histogram = self.fetch_histogram().await?;
        let price = histogram.lowest_sell_price()?;
        debug!("Lowest sell order on the market is {price}");
        Ok(price)
    }
}
