use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Invalid currency pair: {0}")]
    InvalidCurrencyPair(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Rate fetch failed: {0}")]
    FetchError(String),
}
