use num_traits::Zero;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DECIMAL_PRECISION;
use crate::currency::CurrencyView;
use crate::errors::CalculatorError;
use crate::positions::Position;

/// Derives unit cost and cost value for a position. All figures are rounded
/// half-up at a single precision so the cost invariants hold system-wide.
#[derive(Debug, Default, Clone)]
pub struct AverageCostCalculator;

impl AverageCostCalculator {
    pub fn new() -> Self {
        AverageCostCalculator
    }

    /// Cost basis over total quantity. Callers must check quantity first;
    /// a zero total here is a caller bug, not a runtime condition.
    pub fn unit_cost(
        &self,
        cost_basis: Decimal,
        total_quantity: Decimal,
    ) -> Result<Decimal, CalculatorError> {
        if total_quantity.is_zero() {
            return Err(CalculatorError::DivisionByZero);
        }
        Ok((cost_basis / total_quantity)
            .round_dp_with_strategy(DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Refreshes `average_cost` and `cost_value` on every money view from
    /// its own cost basis. With no quantity held the average cost is left
    /// undefined and the cost value collapses to zero.
    pub fn apply_cost_value(&self, position: &mut Position) -> Result<(), CalculatorError> {
        let total = position.quantity_values.total();
        for view in [
            CurrencyView::Trade,
            CurrencyView::Portfolio,
            CurrencyView::Base,
        ] {
            let money = position.money_mut(view);
            if total.is_zero() {
                money.average_cost = None;
                money.cost_value = Decimal::ZERO;
            } else {
                let average_cost = self.unit_cost(money.cost_basis, total)?;
                money.average_cost = Some(average_cost);
                money.cost_value = average_cost * total;
            }
        }
        Ok(())
    }
}
