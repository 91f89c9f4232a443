use serde::{Deserialize, Serialize};

use crate::MarketApiError;

/// The subset of the item order histogram response that the storefront uses.
///
/// Prices are quoted as strings of integer minor units, e.g. `"6370"`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderHistogram {
    #[serde(default)]
    pub lowest_sell_order: Option<String>,
    #[serde(default)]
    pub highest_buy_order: Option<String>,
}

impl OrderHistogram {
    pub fn lowest_sell_price(&self) -> Result<i64, MarketApiError> {
        let price = self.lowest_sell_order.as_deref().ok_or(MarketApiError::NoSellOrders)?;
        price.trim().parse::<i64>().map_err(|e| MarketApiError::InvalidPrice(format!("{price}. {e}")))
    }
}
