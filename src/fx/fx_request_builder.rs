use chrono::Utc;
use log::debug;
use std::collections::BTreeSet;

use crate::fx::{FxRequest, IsoCurrencyPair};
use crate::positions::Positions;

/// Builds the single batched FX request for a position set: one pair from
/// the base currency and one from the portfolio currency to every distinct
/// asset trade currency, deduplicated. Identity pairs are kept; the
/// provider resolves them to 1 so downstream conversion is uniform.
#[derive(Debug, Default, Clone)]
pub struct FxRequestBuilder;

impl FxRequestBuilder {
    pub fn new() -> Self {
        FxRequestBuilder
    }

    /// Pins `positions.as_at` to today when unset (the positions
    /// collection is an in/out parameter here, not a pure input) and
    /// returns the deduplicated pair batch for that date.
    pub fn build_request(&self, base_currency: &str, positions: &mut Positions) -> FxRequest {
        let as_at = match positions.as_at {
            Some(date) => date,
            None => {
                let today = Utc::now().date_naive();
                positions.as_at = Some(today);
                today
            }
        };

        let portfolio_currency = positions.portfolio.currency.clone();
        let mut pairs: BTreeSet<IsoCurrencyPair> = BTreeSet::new();
        for position in positions.positions.values() {
            let asset_currency = &position.trade.currency;
            pairs.insert(IsoCurrencyPair::new(base_currency, asset_currency));
            pairs.insert(IsoCurrencyPair::new(&portfolio_currency, asset_currency));
        }

        debug!(
            "Built FX request for portfolio {}: {} pairs as at {}",
            positions.portfolio.id,
            pairs.len(),
            as_at
        );
        FxRequest {
            as_at,
            pairs: pairs.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Portfolio;
    use chrono::NaiveDate;

    fn positions_with(assets: &[(&str, &str)]) -> Positions {
        let mut positions = Positions::new(Portfolio::new("TEST", "NZD", "USD", "owner-1"));
        for (asset_id, currency) in assets {
            positions.get_or_create(asset_id, currency);
        }
        positions
    }

    #[test]
    fn dedups_pairs_across_positions() {
        // Three positions over two distinct trade currencies against one
        // base and one portfolio currency: at most 2 * 2 pairs.
        let mut positions =
            positions_with(&[("EBAY", "SGD"), ("MSFT", "SGD"), ("AAPL", "AUD")]);
        positions.as_at = NaiveDate::from_ymd_opt(2024, 5, 1);

        let request = FxRequestBuilder::new().build_request("USD", &mut positions);

        assert_eq!(request.pairs.len(), 4);
        assert!(request.pairs.contains(&IsoCurrencyPair::new("USD", "SGD")));
        assert!(request.pairs.contains(&IsoCurrencyPair::new("NZD", "SGD")));
        assert!(request.pairs.contains(&IsoCurrencyPair::new("USD", "AUD")));
        assert!(request.pairs.contains(&IsoCurrencyPair::new("NZD", "AUD")));
    }

    #[test]
    fn identity_pairs_are_not_filtered() {
        let mut positions = positions_with(&[("AMZN", "USD")]);
        positions.as_at = NaiveDate::from_ymd_opt(2024, 5, 1);

        let request = FxRequestBuilder::new().build_request("USD", &mut positions);

        assert!(request.pairs.contains(&IsoCurrencyPair::new("USD", "USD")));
        assert!(request.pairs.contains(&IsoCurrencyPair::new("NZD", "USD")));
    }

    #[test]
    fn unset_as_at_defaults_to_today_and_is_written_back() {
        let mut positions = positions_with(&[("EBAY", "SGD")]);
        assert!(positions.as_at.is_none());

        let request = FxRequestBuilder::new().build_request("USD", &mut positions);

        let today = Utc::now().date_naive();
        assert_eq!(request.as_at, today);
        assert_eq!(positions.as_at, Some(today));
    }

    #[test]
    fn preset_as_at_is_echoed_untouched() {
        let mut positions = positions_with(&[("EBAY", "SGD")]);
        let fixed = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
        positions.as_at = Some(fixed);

        let request = FxRequestBuilder::new().build_request("USD", &mut positions);

        assert_eq!(request.as_at, fixed);
        assert_eq!(positions.as_at, Some(fixed));
    }
}
