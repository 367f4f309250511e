use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// An ISO-4217 currency with its decimal-places convention.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub decimal_places: u32,
}

impl Currency {
    pub fn new(code: &str) -> Self {
        Currency {
            code: code.to_string(),
            decimal_places: decimal_places(code),
        }
    }
}

static CURRENCY_DECIMALS: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

fn get_reference_set() -> &'static HashMap<&'static str, u32> {
    CURRENCY_DECIMALS.get_or_init(|| {
        let mut map = HashMap::new();
        // Zero-decimal currencies
        map.insert("JPY", 0);
        map.insert("KRW", 0);
        map.insert("VND", 0);
        // Three-decimal currencies
        map.insert("BHD", 3);
        map.insert("KWD", 3);
        map.insert("OMR", 3);
        // Two-decimal majors
        map.insert("USD", 2);
        map.insert("EUR", 2);
        map.insert("GBP", 2);
        map.insert("CHF", 2);
        map.insert("AUD", 2);
        map.insert("NZD", 2);
        map.insert("CAD", 2);
        map.insert("SGD", 2);
        map.insert("HKD", 2);
        map.insert("SEK", 2);
        map.insert("NOK", 2);
        map.insert("DKK", 2);
        map.insert("ZAR", 2);
        map.insert("MYR", 2);
        map
    })
}

/// Returns the decimal-places convention for a currency code. Codes outside
/// the reference set fall back to 2, the dominant ISO convention.
pub fn decimal_places(code: &str) -> u32 {
    get_reference_set().get(code).copied().unwrap_or(2)
}

/// True when the code is in the static reference set.
pub fn known_currency(code: &str) -> bool {
    get_reference_set().contains_key(code)
}
