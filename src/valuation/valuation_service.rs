use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::currency::CurrencyView;
use crate::errors::Result;
use crate::events::{CorporateEvent, CorporateEventAdjuster, EventStatus};
use crate::fx::{FxError, FxRequestBuilder, FxResponse, IsoCurrencyPair};
use crate::market_data::{FxRateProviderTrait, MarketDataProviderTrait, PriceResponse};
use crate::positions::{
    AverageCostCalculator, GainsCalculator, Position, PositionStatus, Positions, TrnAccumulator,
};
use crate::transactions::Trn;
use crate::valuation::{IssueKind, ValuationIssue, ValuationRequest, ValuationResponse};

/// Orchestrates one valuation pass: replay the transaction log (with
/// corporate events interleaved at their record dates), batch one FX
/// lookup and one price lookup, then value every position in all three
/// currency views. Owns no state across requests beyond the provider
/// handles, so concurrent passes are independent.
pub struct PositionAggregator {
    fx_provider: Arc<dyn FxRateProviderTrait>,
    price_provider: Arc<dyn MarketDataProviderTrait>,
    fx_request_builder: FxRequestBuilder,
    accumulator: TrnAccumulator,
    average_cost: AverageCostCalculator,
    gains: GainsCalculator,
}

impl PositionAggregator {
    pub fn new(
        fx_provider: Arc<dyn FxRateProviderTrait>,
        price_provider: Arc<dyn MarketDataProviderTrait>,
    ) -> Self {
        PositionAggregator {
            fx_provider,
            price_provider,
            fx_request_builder: FxRequestBuilder::new(),
            accumulator: TrnAccumulator::new(),
            average_cost: AverageCostCalculator::new(),
            gains: GainsCalculator::new(),
        }
    }

    pub async fn value(&self, request: ValuationRequest) -> Result<ValuationResponse> {
        let mut positions = Positions::new(request.portfolio.clone());
        positions.as_at = request.as_at;
        let mut issues = Vec::new();

        self.replay(&request.trns, &request.events, &mut positions, &mut issues)?;

        // One batched FX lookup per pass. The builder pins as_at to today
        // when the request left it unset.
        let fx_request = self
            .fx_request_builder
            .build_request(&request.portfolio.base, &mut positions);
        let as_at = fx_request.as_at;

        let open_assets: Vec<String> = positions
            .positions
            .values()
            .filter(|p| p.quantity_values.has_position())
            .map(|p| p.asset_id.clone())
            .collect();

        // Rates and prices are independent; fetch both batches at once.
        let (rates, prices) = futures::join!(self.fx_provider.get_rates(&fx_request), async {
            if open_assets.is_empty() {
                Ok(PriceResponse::new())
            } else {
                self.price_provider.get_prices(&open_assets, as_at).await
            }
        });
        let rates = rates?;
        let prices = prices.map_err(crate::errors::Error::from)?;

        for position in positions.positions.values_mut() {
            self.value_position(position, &rates, &prices, &mut issues)?;
        }

        let mut valued: Vec<Position> = positions
            .positions
            .into_values()
            .filter(|p| request.include_empty || p.quantity_values.has_position())
            .collect();
        valued.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));

        debug!(
            "Valued portfolio {} as at {}: {} positions, {} issues",
            request.portfolio.id,
            as_at,
            valued.len(),
            issues.len()
        );
        Ok(ValuationResponse {
            portfolio_id: request.portfolio.id.clone(),
            as_at,
            positions: valued,
            cash: positions.cash,
            issues,
        })
    }

    /// Replays transactions in trade-date order, applying each corporate
    /// event once every transaction on or before its record date has been
    /// accumulated, so the event sees the record-date snapshot.
    fn replay(
        &self,
        trns: &[Trn],
        events: &[CorporateEvent],
        positions: &mut Positions,
        issues: &mut Vec<ValuationIssue>,
    ) -> Result<()> {
        let mut trns: Vec<&Trn> = trns.iter().collect();
        trns.sort_by_key(|t| t.trade_date);
        let mut events: Vec<&CorporateEvent> = events.iter().collect();
        events.sort_by_key(|e| e.record_date);

        let mut adjuster = CorporateEventAdjuster::new();
        let mut pending = events.into_iter().peekable();

        for trn in trns {
            while let Some(event) = pending.peek() {
                if event.record_date < trn.trade_date {
                    let event = (*pending.next().unwrap()).clone();
                    self.apply_event(&mut adjuster, &event, positions, issues)?;
                } else {
                    break;
                }
            }
            self.accumulator.accumulate(trn, positions)?;
        }
        for event in pending {
            let event = event.clone();
            self.apply_event(&mut adjuster, &event, positions, issues)?;
        }
        Ok(())
    }

    fn apply_event(
        &self,
        adjuster: &mut CorporateEventAdjuster,
        event: &CorporateEvent,
        positions: &mut Positions,
        issues: &mut Vec<ValuationIssue>,
    ) -> Result<()> {
        let outcomes = adjuster.apply_all(std::slice::from_ref(event), positions)?;
        for (event, status) in outcomes {
            if status == EventStatus::Failed {
                issues.push(ValuationIssue {
                    asset_id: event.asset_id.clone(),
                    kind: IssueKind::EventFailed,
                    detail: format!(
                        "{:?} event on {} could not be applied",
                        event.event_type, event.record_date
                    ),
                });
            }
        }
        Ok(())
    }

    /// Values one position: trade-view market value from the price, then
    /// portfolio and base views via the batched rates, then cost value and
    /// gains. Gains run last; they read final market and cost values.
    fn value_position(
        &self,
        position: &mut Position,
        rates: &FxResponse,
        prices: &PriceResponse,
        issues: &mut Vec<ValuationIssue>,
    ) -> Result<()> {
        let total = position.quantity_values.total();
        position.status = PositionStatus::Valued;
        let mut priced = false;

        if !total.is_zero() {
            match prices.get(&position.asset_id) {
                Some(price) => {
                    position.trade.market_value = price.close * total;
                    position.price_date = Some(price.price_date);
                    priced = true;
                }
                None => {
                    warn!(
                        "No price for {}; position degraded to stale",
                        position.asset_id
                    );
                    position.status = PositionStatus::Stale;
                    issues.push(ValuationIssue {
                        asset_id: position.asset_id.clone(),
                        kind: IssueKind::MissingPrice,
                        detail: format!("No price for {} as at {}", position.asset_id, rates.as_at),
                    });
                }
            }
        }

        let asset_currency = position.trade.currency.clone();
        for view in [CurrencyView::Portfolio, CurrencyView::Base] {
            let view_currency = position.money(view).currency.clone();
            let pair = IsoCurrencyPair::new(&view_currency, &asset_currency);
            match rates.rate(&pair) {
                Ok(rate) => {
                    let trade = position.trade.clone();
                    let money = position.money_mut(view);
                    money.cost_basis = trade.cost_basis / rate;
                    money.market_value = trade.market_value / rate;
                    money.dividends = trade.dividends / rate;
                    money.realised_gain = trade.realised_gain / rate;
                }
                // A missing or unusable rate degrades this view only; it
                // never aborts the batch.
                Err(FxError::RateNotFound(detail)) | Err(FxError::InvalidRate(detail)) => {
                    warn!(
                        "Unusable rate {} for {}; position degraded to stale",
                        pair, position.asset_id
                    );
                    position.status = PositionStatus::Stale;
                    issues.push(ValuationIssue {
                        asset_id: position.asset_id.clone(),
                        kind: IssueKind::MissingRate,
                        detail,
                    });
                }
                Err(other) => return Err(other.into()),
            }
        }

        self.average_cost.apply_cost_value(position)?;
        // An unpriced position has no meaningful unrealised component;
        // feeding a zero total leaves it untouched while dividends and
        // realised gain still roll into the total.
        let gains_total = if priced { total } else { Decimal::ZERO };
        for view in [
            CurrencyView::Trade,
            CurrencyView::Portfolio,
            CurrencyView::Base,
        ] {
            self.gains.apply_gains(gains_total, position.money_mut(view));
        }
        Ok(())
    }
}
