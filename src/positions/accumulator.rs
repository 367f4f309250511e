use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::currency::{CurrencyResolver, CurrencyView};
use crate::errors::CalculatorError;
use crate::positions::{AverageCostCalculator, Positions};
use crate::transactions::{CashImpactResolver, Trn, TrnType};

/// Folds transactions into a position set, maintaining the running
/// average-cost basis and the per-currency cash balances. Splits are not
/// handled here; they arrive as corporate events.
#[derive(Debug, Default, Clone)]
pub struct TrnAccumulator {
    currency_resolver: CurrencyResolver,
    average_cost: AverageCostCalculator,
    cash_impact: CashImpactResolver,
}

impl TrnAccumulator {
    pub fn new() -> Self {
        TrnAccumulator {
            currency_resolver: CurrencyResolver::new(),
            average_cost: AverageCostCalculator::new(),
            cash_impact: CashImpactResolver::new(),
        }
    }

    /// Applies one transaction to the owning position and the cash ledger.
    pub fn accumulate(&self, trn: &Trn, positions: &mut Positions) -> Result<(), CalculatorError> {
        debug!(
            "Accumulating {} {} x{} into portfolio {}",
            trn.trn_type, trn.asset_id, trn.quantity, positions.portfolio.id
        );
        match trn.trn_type {
            TrnType::Buy | TrnType::Add => self.handle_buy(trn, positions)?,
            TrnType::Sell => self.handle_sell(trn, positions)?,
            TrnType::Dividend => self.handle_dividend(trn, positions)?,
            TrnType::Split => {
                // Splits reach positions via the corporate event adjuster.
            }
            TrnType::Deposit | TrnType::Withdrawal | TrnType::Fee | TrnType::Tax => {}
        }
        self.apply_cash(trn, positions);
        Ok(())
    }

    /// The trade view of a position carries a single currency, fixed by the
    /// first transaction seen. A later transaction in a different currency
    /// would silently corrupt the cost basis, so it is rejected.
    fn check_trade_currency(trn: &Trn, positions: &Positions) -> Result<(), CalculatorError> {
        if let Some(position) = positions.get(&trn.asset_id) {
            if position.trade.currency != trn.trade_currency {
                return Err(CalculatorError::CurrencyMismatch {
                    asset_id: trn.asset_id.clone(),
                    position_currency: position.trade.currency.clone(),
                    trn_currency: trn.trade_currency.clone(),
                });
            }
        }
        Ok(())
    }

    fn handle_buy(&self, trn: &Trn, positions: &mut Positions) -> Result<(), CalculatorError> {
        Self::check_trade_currency(trn, positions)?;
        let trade_currency = self
            .currency_resolver
            .resolve(CurrencyView::Trade, &positions.portfolio, trn);
        let position = positions.get_or_create(&trn.asset_id, &trade_currency.code);
        position.quantity_values.purchased += trn.quantity.abs();
        position.trade.cost_basis += trn.trade_amount.abs();
        self.refresh_average_cost(trn, positions)
    }

    fn handle_sell(&self, trn: &Trn, positions: &mut Positions) -> Result<(), CalculatorError> {
        Self::check_trade_currency(trn, positions)?;
        let quantity_sold = trn.quantity.abs();
        let position = positions
            .get_mut(&trn.asset_id)
            .ok_or_else(|| CalculatorError::OversoldPosition(trn.asset_id.clone()))?;

        let total_before = position.quantity_values.total();
        if quantity_sold > total_before {
            return Err(CalculatorError::OversoldPosition(trn.asset_id.clone()));
        }

        let average_cost = self
            .average_cost
            .unit_cost(position.trade.cost_basis, total_before)?;
        let cost_of_sale = average_cost * quantity_sold;
        let proceeds = trn.trade_amount.abs();

        position.quantity_values.sold += quantity_sold;
        position.trade.realised_gain += proceeds - cost_of_sale;
        if position.quantity_values.total().is_zero() {
            // Close out exactly; proportional reduction would leave
            // rounding residue in the basis.
            position.trade.cost_basis = Decimal::ZERO;
        } else {
            position.trade.cost_basis -= cost_of_sale;
        }
        self.refresh_average_cost(trn, positions)
    }

    fn handle_dividend(&self, trn: &Trn, positions: &mut Positions) -> Result<(), CalculatorError> {
        Self::check_trade_currency(trn, positions)?;
        let trade_currency = self
            .currency_resolver
            .resolve(CurrencyView::Trade, &positions.portfolio, trn);
        let position = positions.get_or_create(&trn.asset_id, &trade_currency.code);
        position.trade.dividends += trn.trade_amount.abs();
        Ok(())
    }

    fn apply_cash(&self, trn: &Trn, positions: &mut Positions) {
        let impact = self.cash_impact.cash_impact(trn);
        if !impact.is_zero() {
            let currency = trn.settlement_currency().to_string();
            positions.add_cash(&currency, impact);
        }
    }

    fn refresh_average_cost(
        &self,
        trn: &Trn,
        positions: &mut Positions,
    ) -> Result<(), CalculatorError> {
        let position = positions
            .get_mut(&trn.asset_id)
            .ok_or_else(|| CalculatorError::Calculation(trn.asset_id.clone()))?;
        let total = position.quantity_values.total();
        if total.is_zero() {
            position.trade.average_cost = None;
            position.trade.cost_value = Decimal::ZERO;
        } else {
            let average_cost = self.average_cost.unit_cost(position.trade.cost_basis, total)?;
            position.trade.average_cost = Some(average_cost);
            position.trade.cost_value = average_cost * total;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Portfolio;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn buy(asset: &str, quantity: Decimal, amount: Decimal) -> Trn {
        Trn::new(TrnType::Buy, asset, date("2024-01-02"), "USD", quantity, amount)
    }

    fn sell(asset: &str, quantity: Decimal, amount: Decimal) -> Trn {
        Trn::new(TrnType::Sell, asset, date("2024-02-02"), "USD", quantity, amount)
    }

    fn positions() -> Positions {
        Positions::new(Portfolio::new("TEST", "USD", "USD", "owner-1"))
    }

    #[test]
    fn buys_average_into_the_cost_basis() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(2000)), &mut positions)
            .unwrap();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(3000)), &mut positions)
            .unwrap();

        let position = positions.get("MSFT").unwrap();
        assert_eq!(position.quantity_values.total(), dec!(200));
        assert_eq!(position.trade.cost_basis, dec!(5000));
        assert_eq!(position.trade.average_cost, Some(dec!(25)));
        assert_eq!(position.trade.cost_value, dec!(5000));
    }

    #[test]
    fn sell_realises_gain_against_average_cost() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(2000)), &mut positions)
            .unwrap();
        // Sell half at 30/share against a 20/share average
        accumulator
            .accumulate(&sell("MSFT", dec!(50), dec!(1500)), &mut positions)
            .unwrap();

        let position = positions.get("MSFT").unwrap();
        assert_eq!(position.quantity_values.total(), dec!(50));
        assert_eq!(position.trade.realised_gain, dec!(500));
        assert_eq!(position.trade.cost_basis, dec!(1000));
        assert_eq!(position.trade.average_cost, Some(dec!(20)));
    }

    #[test]
    fn closing_sell_zeroes_the_basis_exactly() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(3), dec!(100)), &mut positions)
            .unwrap();
        accumulator
            .accumulate(&sell("MSFT", dec!(3), dec!(120)), &mut positions)
            .unwrap();

        let position = positions.get("MSFT").unwrap();
        assert_eq!(position.quantity_values.total(), Decimal::ZERO);
        assert_eq!(position.trade.cost_basis, Decimal::ZERO);
        assert_eq!(position.trade.average_cost, None);
        assert_eq!(position.trade.cost_value, Decimal::ZERO);
        // 120 - 3 * 33.333333 = 20.000001
        assert_eq!(position.trade.realised_gain, dec!(20.000001));
    }

    #[test]
    fn mixed_trade_currency_is_rejected_before_any_mutation() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(2000)), &mut positions)
            .unwrap();

        // Same asset, different trade currency: adding 2600 SGD into a USD
        // basis would corrupt it.
        let mut sgd_buy = buy("MSFT", dec!(100), dec!(2600));
        sgd_buy.trade_currency = "SGD".to_string();
        let err = accumulator.accumulate(&sgd_buy, &mut positions).unwrap_err();
        assert!(matches!(err, CalculatorError::CurrencyMismatch { .. }));

        // The position is untouched
        let position = positions.get("MSFT").unwrap();
        assert_eq!(position.quantity_values.total(), dec!(100));
        assert_eq!(position.trade.cost_basis, dec!(2000));

        // Sells and dividends are guarded the same way
        let mut sgd_sell = sell("MSFT", dec!(10), dec!(300));
        sgd_sell.trade_currency = "SGD".to_string();
        assert!(matches!(
            accumulator.accumulate(&sgd_sell, &mut positions),
            Err(CalculatorError::CurrencyMismatch { .. })
        ));
        let sgd_divi = Trn::new(
            TrnType::Dividend,
            "MSFT",
            date("2024-03-01"),
            "SGD",
            Decimal::ZERO,
            dec!(55),
        );
        assert!(matches!(
            accumulator.accumulate(&sgd_divi, &mut positions),
            Err(CalculatorError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn oversell_is_rejected_not_clamped() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(10), dec!(200)), &mut positions)
            .unwrap();
        let err = accumulator
            .accumulate(&sell("MSFT", dec!(11), dec!(250)), &mut positions)
            .unwrap_err();
        assert!(matches!(err, CalculatorError::OversoldPosition(_)));
    }

    #[test]
    fn dividends_accumulate_without_touching_quantity() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(2000)), &mut positions)
            .unwrap();
        let divi = Trn::new(
            TrnType::Dividend,
            "MSFT",
            date("2024-03-01"),
            "USD",
            Decimal::ZERO,
            dec!(55),
        );
        accumulator.accumulate(&divi, &mut positions).unwrap();

        let position = positions.get("MSFT").unwrap();
        assert_eq!(position.trade.dividends, dec!(55));
        assert_eq!(position.quantity_values.total(), dec!(100));
        // Dividend credits cash
        assert_eq!(positions.cash["USD"], dec!(55) - dec!(2000));
    }

    #[test]
    fn cash_ledger_follows_the_sign_convention() {
        let accumulator = TrnAccumulator::new();
        let mut positions = positions();
        let deposit = Trn::new(
            TrnType::Deposit,
            "USD",
            date("2024-01-01"),
            "USD",
            Decimal::ZERO,
            dec!(10000),
        );
        accumulator.accumulate(&deposit, &mut positions).unwrap();
        accumulator
            .accumulate(&buy("MSFT", dec!(100), dec!(2000)), &mut positions)
            .unwrap();

        assert_eq!(positions.cash["USD"], dec!(8000));
    }
}
