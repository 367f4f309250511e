use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::currency::Currency;
use crate::errors::CurrencyError;
use crate::portfolio::Portfolio;
use crate::transactions::Trn;

/// The three currency views every monetary field is reported in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyView {
    Trade,
    Portfolio,
    Base,
}

impl CurrencyView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyView::Trade => "TRADE",
            CurrencyView::Portfolio => "PORTFOLIO",
            CurrencyView::Base => "BASE",
        }
    }
}

impl fmt::Display for CurrencyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyView {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRADE" => Ok(CurrencyView::Trade),
            "PORTFOLIO" => Ok(CurrencyView::Portfolio),
            "BASE" => Ok(CurrencyView::Base),
            other => Err(CurrencyError::InvalidView(other.to_string())),
        }
    }
}

/// Maps a currency view onto the currency that applies to it for a given
/// transaction within a portfolio. Total over the view enum; the string
/// boundary (`FromStr`) is where unrecognized views are rejected.
#[derive(Debug, Default, Clone)]
pub struct CurrencyResolver;

impl CurrencyResolver {
    pub fn new() -> Self {
        CurrencyResolver
    }

    pub fn resolve(&self, view: CurrencyView, portfolio: &Portfolio, trn: &Trn) -> Currency {
        match view {
            CurrencyView::Trade => Currency::new(&trn.trade_currency),
            CurrencyView::Portfolio => Currency::new(&portfolio.currency),
            CurrencyView::Base => Currency::new(&portfolio.base),
        }
    }
}
