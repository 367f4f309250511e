use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fx::FxError;

/// An ordered (from, to) currency pair. The rate quoted for a pair is the
/// amount of `to` currency bought by one unit of `from` currency, so an
/// amount expressed in `to` converts into `from` by division.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct IsoCurrencyPair {
    pub from: String,
    pub to: String,
}

impl IsoCurrencyPair {
    pub fn new(from: &str, to: &str) -> Self {
        IsoCurrencyPair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn inverse(&self) -> Self {
        IsoCurrencyPair {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for IsoCurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

/// One batch of pairs to price as at a single date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FxRequest {
    pub as_at: NaiveDate,
    pub pairs: Vec<IsoCurrencyPair>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    pub pair: IsoCurrencyPair,
    pub rate: Decimal,
}

/// Resolved rates keyed by the requested pairs. Lookup is order
/// insensitive: a rate for (A,B) serves (B,A) as its reciprocal. Identity
/// pairs always resolve to 1. Any other absent pair is a provider error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxResponse {
    pub as_at: NaiveDate,
    pub rates: Vec<FxRate>,
}

impl FxResponse {
    pub fn new(as_at: NaiveDate) -> Self {
        FxResponse {
            as_at,
            rates: Vec::new(),
        }
    }

    pub fn with_rate(mut self, pair: IsoCurrencyPair, rate: Decimal) -> Self {
        self.rates.push(FxRate { pair, rate });
        self
    }

    pub fn rate(&self, pair: &IsoCurrencyPair) -> Result<Decimal, FxError> {
        if pair.is_identity() {
            return Ok(Decimal::ONE);
        }
        if let Some(found) = self.rates.iter().find(|r| &r.pair == pair) {
            if found.rate.is_zero() {
                return Err(FxError::InvalidRate(format!(
                    "Zero rate supplied for {}",
                    pair
                )));
            }
            return Ok(found.rate);
        }
        let inverse = pair.inverse();
        if let Some(found) = self.rates.iter().find(|r| r.pair == inverse) {
            if found.rate.is_zero() {
                return Err(FxError::InvalidRate(format!(
                    "Zero rate for {} cannot be inverted",
                    inverse
                )));
            }
            return Ok(Decimal::ONE / found.rate);
        }
        Err(FxError::RateNotFound(format!(
            "No rate for {} as at {}",
            pair, self.as_at
        )))
    }
}
