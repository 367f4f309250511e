pub mod valuation_model;
pub mod valuation_service;

pub use valuation_model::{IssueKind, ValuationIssue, ValuationRequest, ValuationResponse};
pub use valuation_service::PositionAggregator;
