pub mod cash_impact;
pub mod trn_model;

pub use cash_impact::CashImpactResolver;
pub use trn_model::{CashDirection, Trn, TrnType};
