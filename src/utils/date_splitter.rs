use chrono::{Duration, NaiveDate, Utc};

use crate::constants::{DEFAULT_LOOKBACK_DAYS, DEFAULT_STEP_DAYS};

/// Partitions a date range into ordered checkpoint dates at a fixed step so
/// replay/backfill collaborators can work in bounded chunks. Deterministic:
/// same inputs, same ordered output.
#[derive(Debug, Default, Clone)]
pub struct DateSplitter;

impl DateSplitter {
    /// Checkpoints from `from` inclusive, stepping `step_days`, always
    /// ending on `to` even when the last step overshoots it. A step below
    /// one day is treated as one day.
    pub fn split(step_days: i64, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let step = Duration::days(step_days.max(1));
        let mut dates = Vec::new();
        let mut current = from;
        while current < to {
            dates.push(current);
            current += step;
        }
        dates.push(to);
        dates
    }

    /// The default lookback window ending today.
    pub fn split_default() -> Vec<NaiveDate> {
        let today = Utc::now().date_naive();
        let from = today - Duration::days(DEFAULT_LOOKBACK_DAYS);
        Self::split(DEFAULT_STEP_DAYS, from, today)
    }
}
