use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closing price for one asset as at a price date.
///
/// `dividend` is `None` when the provider signalled no corporate event this
/// period; a zero dividend is a real, zero-valued signal and stays `Some`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPrice {
    pub asset_id: String,
    pub close: Decimal,
    pub price_date: NaiveDate,
    pub dividend: Option<Decimal>,
}

/// Batch price lookup result, keyed by asset id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub prices: HashMap<String, AssetPrice>,
}

impl PriceResponse {
    pub fn new() -> Self {
        PriceResponse::default()
    }

    pub fn with_price(mut self, price: AssetPrice) -> Self {
        self.prices.insert(price.asset_id.clone(), price);
        self
    }

    pub fn get(&self, asset_id: &str) -> Option<&AssetPrice> {
        self.prices.get(asset_id)
    }
}
