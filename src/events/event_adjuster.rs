use chrono::NaiveDate;
use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::events::{CorporateEvent, EventError, EventStatus, EventType};
use crate::positions::{AverageCostCalculator, Position, Positions};

/// Applies corporate events to the owning positions. Holds the applied
/// (asset, record date) key set so uniqueness is enforced here, not only
/// by a storage layer. One adjuster instance serves one valuation pass;
/// callers serialize event application per asset.
#[derive(Debug, Default)]
pub struct CorporateEventAdjuster {
    average_cost: AverageCostCalculator,
    applied: HashSet<(String, NaiveDate)>,
}

impl CorporateEventAdjuster {
    pub fn new() -> Self {
        CorporateEventAdjuster::default()
    }

    /// Applies one event to its position. Re-application of the same
    /// (asset, record date) key is rejected.
    pub fn apply(
        &mut self,
        event: &CorporateEvent,
        position: &mut Position,
    ) -> Result<EventStatus, EventError> {
        if self.applied.contains(&event.key()) {
            return Err(EventError::DuplicateEvent {
                asset_id: event.asset_id.clone(),
                record_date: event.record_date,
            });
        }

        let status = match event.event_type {
            EventType::Dividend => self.apply_dividend(event, position),
            EventType::Split => self.apply_split(event, position)?,
        };
        if status == EventStatus::Applied {
            self.applied.insert(event.key());
        }
        Ok(status)
    }

    /// Applies a batch against a position set, pairing each event with its
    /// outcome. Events for unknown assets fail individually; they never
    /// abort the batch.
    pub fn apply_all(
        &mut self,
        events: &[CorporateEvent],
        positions: &mut Positions,
    ) -> Result<Vec<(CorporateEvent, EventStatus)>, EventError> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            let status = match positions.get_mut(&event.asset_id) {
                Some(position) => self.apply(event, position)?,
                None => {
                    warn!(
                        "Corporate event for unknown asset {} on {}; marking failed",
                        event.asset_id, event.record_date
                    );
                    EventStatus::Failed
                }
            };
            outcomes.push((event.clone(), status));
        }
        Ok(outcomes)
    }

    /// Dividend: credits `rate * quantity held` into the trade-view
    /// dividends at the record-date snapshot. Quantity and cost basis are
    /// untouched.
    fn apply_dividend(&self, event: &CorporateEvent, position: &mut Position) -> EventStatus {
        let quantity = position.quantity_values.total();
        if quantity.is_zero() {
            warn!(
                "Dividend for {} on {} hit a zero-quantity position; marking failed",
                event.asset_id, event.record_date
            );
            return EventStatus::Failed;
        }
        position.trade.dividends += event.rate * quantity;
        debug!(
            "Applied dividend {} x {} to {}",
            event.rate, quantity, event.asset_id
        );
        EventStatus::Applied
    }

    /// Split: rescales quantity by the ratio and average cost by its
    /// inverse. Cost value and cost basis are invariant under a split.
    fn apply_split(
        &self,
        event: &CorporateEvent,
        position: &mut Position,
    ) -> Result<EventStatus, EventError> {
        let ratio = event.rate;
        if ratio <= Decimal::ZERO {
            return Err(EventError::InvalidRatio(ratio.to_string()));
        }
        let total_before = position.quantity_values.total();
        if total_before.is_zero() {
            warn!(
                "Split for {} on {} hit a zero-quantity position; marking failed",
                event.asset_id, event.record_date
            );
            return Ok(EventStatus::Failed);
        }

        let total_after = total_before * ratio;
        position.quantity_values.adjusted += total_after - total_before;

        for money in [
            &mut position.trade,
            &mut position.portfolio,
            &mut position.base,
        ] {
            if let Some(average_cost) = money.average_cost {
                // Rescale from the cost basis rather than dividing the old
                // average, so the average stays consistent with the basis.
                money.average_cost = Some(
                    self.average_cost
                        .unit_cost(money.cost_basis, total_after)
                        .unwrap_or(average_cost / ratio),
                );
            }
        }
        debug!(
            "Applied split {}:1 to {}; quantity {} -> {}",
            ratio, event.asset_id, total_before, total_after
        );
        Ok(EventStatus::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Portfolio;
    use rust_decimal_macros::dec;

    fn record_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    fn open_position(quantity: Decimal, cost_basis: Decimal) -> Position {
        let portfolio = Portfolio::new("TEST", "USD", "USD", "owner-1");
        let mut position = Position::new("MSFT", "USD", &portfolio);
        position.quantity_values.purchased = quantity;
        position.trade.cost_basis = cost_basis;
        AverageCostCalculator::new()
            .apply_cost_value(&mut position)
            .unwrap();
        position
    }

    #[test]
    fn dividend_credits_distributions_only() {
        let mut adjuster = CorporateEventAdjuster::new();
        let mut position = open_position(dec!(100), dec!(2000));
        let event = CorporateEvent::new(
            EventType::Dividend,
            "ALPHA",
            "MSFT",
            record_date(),
            dec!(0.55),
        );

        let status = adjuster.apply(&event, &mut position).unwrap();

        assert_eq!(status, EventStatus::Applied);
        assert_eq!(position.trade.dividends, dec!(55.00));
        assert_eq!(position.quantity_values.total(), dec!(100));
        assert_eq!(position.trade.cost_basis, dec!(2000));
    }

    #[test]
    fn split_preserves_cost_value() {
        let mut adjuster = CorporateEventAdjuster::new();
        let mut position = open_position(dec!(100), dec!(2000));
        let event =
            CorporateEvent::new(EventType::Split, "ALPHA", "MSFT", record_date(), dec!(2));

        let status = adjuster.apply(&event, &mut position).unwrap();

        assert_eq!(status, EventStatus::Applied);
        assert_eq!(position.quantity_values.total(), dec!(200));
        assert_eq!(position.trade.average_cost, Some(dec!(10)));
        assert_eq!(position.trade.cost_value, dec!(2000));
        assert_eq!(position.trade.cost_basis, dec!(2000));
    }

    #[test]
    fn duplicate_event_is_rejected() {
        let mut adjuster = CorporateEventAdjuster::new();
        let mut position = open_position(dec!(100), dec!(2000));
        let event = CorporateEvent::new(
            EventType::Dividend,
            "ALPHA",
            "MSFT",
            record_date(),
            dec!(0.55),
        );

        adjuster.apply(&event, &mut position).unwrap();
        let err = adjuster.apply(&event, &mut position).unwrap_err();

        assert!(matches!(err, EventError::DuplicateEvent { .. }));
        // First application stands; nothing was double counted.
        assert_eq!(position.trade.dividends, dec!(55.00));
    }

    #[test]
    fn failed_event_can_be_retried() {
        let mut adjuster = CorporateEventAdjuster::new();
        let mut position = open_position(Decimal::ZERO, Decimal::ZERO);
        let event = CorporateEvent::new(
            EventType::Dividend,
            "ALPHA",
            "MSFT",
            record_date(),
            dec!(0.55),
        );

        assert_eq!(
            adjuster.apply(&event, &mut position).unwrap(),
            EventStatus::Failed
        );

        // Position fills later; the failed key was not burned.
        position.quantity_values.purchased = dec!(10);
        assert_eq!(
            adjuster.apply(&event, &mut position).unwrap(),
            EventStatus::Applied
        );
        assert_eq!(position.trade.dividends, dec!(5.50));
    }

    #[test]
    fn invalid_split_ratio_is_rejected() {
        let mut adjuster = CorporateEventAdjuster::new();
        let mut position = open_position(dec!(100), dec!(2000));
        let event =
            CorporateEvent::new(EventType::Split, "ALPHA", "MSFT", record_date(), dec!(0));
        assert!(matches!(
            adjuster.apply(&event, &mut position),
            Err(EventError::InvalidRatio(_))
        ));
    }

    #[test]
    fn unknown_asset_fails_without_aborting_the_batch() {
        let mut adjuster = CorporateEventAdjuster::new();
        let portfolio = Portfolio::new("TEST", "USD", "USD", "owner-1");
        let mut positions = Positions::new(portfolio);
        positions
            .get_or_create("MSFT", "USD")
            .quantity_values
            .purchased = dec!(10);

        let events = vec![
            CorporateEvent::new(EventType::Dividend, "ALPHA", "GHOST", record_date(), dec!(1)),
            CorporateEvent::new(EventType::Dividend, "ALPHA", "MSFT", record_date(), dec!(1)),
        ];
        let outcomes = adjuster.apply_all(&events, &mut positions).unwrap();

        assert_eq!(outcomes[0].1, EventStatus::Failed);
        assert_eq!(outcomes[1].1, EventStatus::Applied);
    }
}
