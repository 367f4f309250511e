use num_traits::Zero;
use rust_decimal::Decimal;

use crate::positions::MoneyValues;

/// Derives the gain components of a money view. Must run after market value
/// and cost value are both final for the pass; `total_gain` computed any
/// earlier is stale.
#[derive(Debug, Default, Clone)]
pub struct GainsCalculator;

impl GainsCalculator {
    pub fn new() -> Self {
        GainsCalculator
    }

    /// Sets `unrealised_gain` (open positions only) and re-derives
    /// `total_gain = unrealised + dividends + realised`. A fully closed
    /// position has no unrealised component by construction.
    pub fn apply_gains(&self, total: Decimal, money: &mut MoneyValues) {
        if !total.is_zero() {
            money.unrealised_gain = money.market_value - money.cost_value;
        }
        money.total_gain = money.unrealised_gain + money.dividends + money.realised_gain;
    }
}
