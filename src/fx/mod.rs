pub mod fx_errors;
pub mod fx_model;
pub mod fx_request_builder;

pub use fx_errors::FxError;
pub use fx_model::{FxRate, FxRequest, FxResponse, IsoCurrencyPair};
pub use fx_request_builder::FxRequestBuilder;
