pub mod currency_model;
pub mod currency_resolver;

pub use currency_model::{decimal_places, known_currency, Currency};
pub use currency_resolver::{CurrencyResolver, CurrencyView};
