use thiserror::Error;

use crate::events::EventError;
use crate::fx::FxError;
use crate::market_data::MarketDataError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Currency operation failed: {0}")]
    Currency(#[from] CurrencyError),

    #[error("FX operation failed: {0}")]
    Fx(#[from] FxError),

    #[error("Calculation failed: {0}")]
    Calculator(#[from] CalculatorError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Corporate event error: {0}")]
    Event(#[from] EventError),

    #[error("Input validation failed: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Unrecognized currency view '{0}'")]
    InvalidView(String),

    #[error("Invalid currency code '{0}'")]
    InvalidCode(String),
}

/// Errors raised by the pure calculators. These indicate caller bugs rather
/// than runtime conditions and are not recovered inside a valuation pass.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Division by zero: unit cost requested for zero total quantity")]
    DivisionByZero,

    #[error("Transaction would take position {0} negative; shorting is not supported")]
    OversoldPosition(String),

    #[error("Unsupported transaction type: {0}")]
    UnsupportedTrnType(String),

    #[error(
        "Transaction currency {trn_currency} does not match position currency {position_currency} for asset {asset_id}"
    )]
    CurrencyMismatch {
        asset_id: String,
        position_currency: String,
        trn_currency: String,
    },

    #[error("Calculation error: {0}")]
    Calculation(String),
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

// Add From implementation for serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}
