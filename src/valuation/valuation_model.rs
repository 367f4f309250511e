use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::events::CorporateEvent;
use crate::portfolio::Portfolio;
use crate::positions::Position;
use crate::transactions::Trn;

/// One valuation request: a portfolio, its transaction log, the corporate
/// events already ingested for it, and an optional as-at date (defaults to
/// today during the pass).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    pub portfolio: Portfolio,
    pub as_at: Option<NaiveDate>,
    pub trns: Vec<Trn>,
    pub events: Vec<CorporateEvent>,
    /// When false, positions whose quantity has reached zero are filtered
    /// from the response. Their gains are computed either way.
    pub include_empty: bool,
}

impl ValuationRequest {
    pub fn new(portfolio: Portfolio, trns: Vec<Trn>) -> Self {
        ValuationRequest {
            portfolio,
            as_at: None,
            trns,
            events: Vec::new(),
            include_empty: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    MissingPrice,
    MissingRate,
    EventFailed,
}

/// A per-position degradation recorded during a pass. Issues never abort
/// the batch; the affected position is reported as stale instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationIssue {
    pub asset_id: String,
    pub kind: IssueKind,
    pub detail: String,
}

/// The valued position set for one portfolio as at one date, alongside the
/// cash ledger and any per-position degradations.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResponse {
    pub portfolio_id: String,
    pub as_at: NaiveDate,
    pub positions: Vec<Position>,
    pub cash: HashMap<String, Decimal>,
    pub issues: Vec<ValuationIssue>,
}
