pub mod constants;
pub mod errors;

pub mod currency;
pub mod events;
pub mod fx;
pub mod market_data;
pub mod portfolio;
pub mod positions;
pub mod transactions;
pub mod utils;
pub mod valuation;

pub use errors::{Error, Result};
pub use portfolio::Portfolio;
pub use positions::{MoneyValues, Position, Positions, QuantityValues};
pub use transactions::{Trn, TrnType};
pub use valuation::{PositionAggregator, ValuationRequest, ValuationResponse};
