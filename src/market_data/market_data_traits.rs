use async_trait::async_trait;
use chrono::NaiveDate;

use crate::fx::{FxError, FxRequest, FxResponse};
use crate::market_data::{MarketDataError, PriceResponse};

/// Boundary to the external FX rate provider. One call per valuation pass;
/// the response must echo the request's as-at date.
#[async_trait]
pub trait FxRateProviderTrait: Send + Sync {
    async fn get_rates(&self, request: &FxRequest) -> Result<FxResponse, FxError>;
}

/// Boundary to the external price provider. An asset absent from the
/// response degrades that position only, never the batch.
#[async_trait]
pub trait MarketDataProviderTrait: Send + Sync {
    async fn get_prices(
        &self,
        asset_ids: &[String],
        as_at: NaiveDate,
    ) -> Result<PriceResponse, MarketDataError>;
}
