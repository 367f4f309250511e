pub mod event_adjuster;
pub mod event_model;

pub use event_adjuster::CorporateEventAdjuster;
pub use event_model::{CorporateEvent, EventStatus, EventType};

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Corporate event for asset '{asset_id}' on {record_date} has already been applied")]
    DuplicateEvent {
        asset_id: String,
        record_date: NaiveDate,
    },

    #[error("Invalid split ratio '{0}'; ratio must be positive")]
    InvalidRatio(String),
}
