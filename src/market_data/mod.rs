pub mod market_data_model;
pub mod market_data_traits;

pub use market_data_model::{AssetPrice, PriceResponse};
pub use market_data_traits::{FxRateProviderTrait, MarketDataProviderTrait};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("No price available for asset '{0}'")]
    MissingPrice(String),

    #[error("Price fetch failed: {0}")]
    FetchError(String),
}
