use serde::{Deserialize, Serialize};

/// A portfolio with its nominal currency and the owner's reporting ("base")
/// currency. Asset positions belong to exactly one portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub currency: String,
    pub base: String,
    pub owner_id: String,
}

impl Portfolio {
    pub fn new(id: &str, currency: &str, base: &str, owner_id: &str) -> Self {
        Portfolio {
            id: id.to_string(),
            currency: currency.to_string(),
            base: base.to_string(),
            owner_id: owner_id.to_string(),
        }
    }
}
