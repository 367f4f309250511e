use chrono::NaiveDate;
use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::currency::CurrencyView;
use crate::portfolio::Portfolio;

/// Quantity movements for one position. Quantity is currency independent;
/// all three money views share a position's single `QuantityValues`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuantityValues {
    pub opening: Decimal,
    pub purchased: Decimal,
    /// Stored as a positive magnitude.
    pub sold: Decimal,
    /// Net quantity effect of corporate actions (splits).
    pub adjusted: Decimal,
}

impl QuantityValues {
    /// Net quantity held. Must never be negative; the accumulator rejects
    /// oversells before they reach here.
    pub fn total(&self) -> Decimal {
        self.opening + self.purchased - self.sold + self.adjusted
    }

    pub fn has_position(&self) -> bool {
        !self.total().is_zero()
    }
}

/// Monetary fields for one currency view of one position.
///
/// `average_cost` is `None`, not zero, while the position holds no quantity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyValues {
    pub currency: String,
    pub cost_basis: Decimal,
    pub average_cost: Option<Decimal>,
    pub cost_value: Decimal,
    pub market_value: Decimal,
    pub dividends: Decimal,
    pub realised_gain: Decimal,
    pub unrealised_gain: Decimal,
    pub total_gain: Decimal,
}

impl MoneyValues {
    pub fn new(currency: &str) -> Self {
        MoneyValues {
            currency: currency.to_string(),
            cost_basis: Decimal::ZERO,
            average_cost: None,
            cost_value: Decimal::ZERO,
            market_value: Decimal::ZERO,
            dividends: Decimal::ZERO,
            realised_gain: Decimal::ZERO,
            unrealised_gain: Decimal::ZERO,
            total_gain: Decimal::ZERO,
        }
    }
}

/// Valuation outcome for a position within one pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    /// Built from transactions but not yet priced.
    #[default]
    Pending,
    /// All three views populated from current market data.
    Valued,
    /// A price or rate was missing; monetary fields may be incomplete.
    Stale,
}

/// The holding of one asset within a portfolio, valued in three views.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub asset_id: String,
    pub quantity_values: QuantityValues,
    pub trade: MoneyValues,
    pub portfolio: MoneyValues,
    pub base: MoneyValues,
    pub status: PositionStatus,
    /// Date of the market price actually used, when one was found.
    pub price_date: Option<NaiveDate>,
}

impl Position {
    pub fn new(asset_id: &str, trade_currency: &str, portfolio: &Portfolio) -> Self {
        Position {
            asset_id: asset_id.to_string(),
            quantity_values: QuantityValues::default(),
            trade: MoneyValues::new(trade_currency),
            portfolio: MoneyValues::new(&portfolio.currency),
            base: MoneyValues::new(&portfolio.base),
            status: PositionStatus::default(),
            price_date: None,
        }
    }

    pub fn money(&self, view: CurrencyView) -> &MoneyValues {
        match view {
            CurrencyView::Trade => &self.trade,
            CurrencyView::Portfolio => &self.portfolio,
            CurrencyView::Base => &self.base,
        }
    }

    pub fn money_mut(&mut self, view: CurrencyView) -> &mut MoneyValues {
        match view {
            CurrencyView::Trade => &mut self.trade,
            CurrencyView::Portfolio => &mut self.portfolio,
            CurrencyView::Base => &mut self.base,
        }
    }
}

/// One portfolio's position set for a single valuation pass, keyed by
/// asset id, plus the cash balances accumulated from cash-settling
/// transactions.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Positions {
    pub portfolio: Portfolio,
    /// The valuation date. Left unset until a caller (or the FX request
    /// builder) pins it.
    pub as_at: Option<NaiveDate>,
    pub positions: HashMap<String, Position>,
    pub cash: HashMap<String, Decimal>,
}

impl Positions {
    pub fn new(portfolio: Portfolio) -> Self {
        Positions {
            portfolio,
            as_at: None,
            positions: HashMap::new(),
            cash: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, asset_id: &str, trade_currency: &str) -> &mut Position {
        if !self.positions.contains_key(asset_id) {
            let position = Position::new(asset_id, trade_currency, &self.portfolio);
            self.positions.insert(asset_id.to_string(), position);
        }
        self.positions.get_mut(asset_id).unwrap()
    }

    pub fn get(&self, asset_id: &str) -> Option<&Position> {
        self.positions.get(asset_id)
    }

    pub fn get_mut(&mut self, asset_id: &str) -> Option<&mut Position> {
        self.positions.get_mut(asset_id)
    }

    pub fn add_cash(&mut self, currency: &str, amount: Decimal) {
        *self
            .cash
            .entry(currency.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
