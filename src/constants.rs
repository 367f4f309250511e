/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Default lookback window, in days, for date-range splitting when no
/// explicit range is given
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Default step, in days, for date-range splitting
pub const DEFAULT_STEP_DAYS: i64 = 30;
