use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Dividend,
    Split,
}

/// Lifecycle of one event application within a valuation pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Applied,
    /// The owning position or its market data was missing.
    Failed,
}

/// A dividend or split affecting one asset, unique per
/// (asset id, record date). Ingested fully formed; the engine never
/// fetches events itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorporateEvent {
    pub event_type: EventType,
    pub source: String,
    pub asset_id: String,
    pub record_date: NaiveDate,
    /// Dividend rate per share, or split ratio.
    pub rate: Decimal,
    pub pay_date: Option<NaiveDate>,
}

impl CorporateEvent {
    pub fn new(
        event_type: EventType,
        source: &str,
        asset_id: &str,
        record_date: NaiveDate,
        rate: Decimal,
    ) -> Self {
        CorporateEvent {
            event_type,
            source: source.to_string(),
            asset_id: asset_id.to_string(),
            record_date,
            rate,
            pay_date: None,
        }
    }

    /// The uniqueness key events are deduplicated on.
    pub fn key(&self) -> (String, NaiveDate) {
        (self.asset_id.clone(), self.record_date)
    }
}
