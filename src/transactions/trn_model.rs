use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a transaction type credits, debits, or leaves cash untouched.
/// The mapping is an exhaustive match so a new variant cannot be added
/// without declaring its cash behavior.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CashDirection {
    Credit,
    Debit,
    Nil,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrnType {
    Buy,
    Sell,
    Dividend,
    Split,
    Deposit,
    Withdrawal,
    Fee,
    Tax,
    Add,
}

impl TrnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrnType::Buy => "BUY",
            TrnType::Sell => "SELL",
            TrnType::Dividend => "DIVI",
            TrnType::Split => "SPLIT",
            TrnType::Deposit => "DEPOSIT",
            TrnType::Withdrawal => "WITHDRAWAL",
            TrnType::Fee => "FEE",
            TrnType::Tax => "TAX",
            TrnType::Add => "ADD",
        }
    }

    /// The signed cash effect class of this transaction type.
    pub fn cash_direction(&self) -> CashDirection {
        match self {
            TrnType::Sell | TrnType::Dividend | TrnType::Deposit => CashDirection::Credit,
            TrnType::Buy | TrnType::Withdrawal | TrnType::Fee | TrnType::Tax => {
                CashDirection::Debit
            }
            TrnType::Split | TrnType::Add => CashDirection::Nil,
        }
    }

    /// True when this type changes the quantity held of an asset.
    pub fn affects_quantity(&self) -> bool {
        matches!(
            self,
            TrnType::Buy | TrnType::Sell | TrnType::Split | TrnType::Add
        )
    }
}

impl fmt::Display for TrnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TrnType::Buy),
            "SELL" => Ok(TrnType::Sell),
            "DIVI" => Ok(TrnType::Dividend),
            "SPLIT" => Ok(TrnType::Split),
            "DEPOSIT" => Ok(TrnType::Deposit),
            "WITHDRAWAL" => Ok(TrnType::Withdrawal),
            "FEE" => Ok(TrnType::Fee),
            "TAX" => Ok(TrnType::Tax),
            "ADD" => Ok(TrnType::Add),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// A single portfolio transaction as recorded in the trade log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trn {
    pub trn_type: TrnType,
    pub asset_id: String,
    pub trade_date: NaiveDate,
    pub trade_currency: String,
    /// Signed quantity delta; positive for buys, positive magnitude for
    /// sells (the type carries the direction).
    pub quantity: Decimal,
    /// Gross monetary amount of the trade, in the trade currency.
    pub trade_amount: Decimal,
    /// Settled cash effect. Non-zero means an upstream system has already
    /// computed it and it is authoritative.
    pub cash_amount: Decimal,
    /// Conversion rate from trade currency to the settlement currency,
    /// when the two differ.
    pub trade_cash_rate: Option<Decimal>,
    pub cash_currency: Option<String>,
}

impl Trn {
    pub fn new(
        trn_type: TrnType,
        asset_id: &str,
        trade_date: NaiveDate,
        trade_currency: &str,
        quantity: Decimal,
        trade_amount: Decimal,
    ) -> Self {
        Trn {
            trn_type,
            asset_id: asset_id.to_string(),
            trade_date,
            trade_currency: trade_currency.to_string(),
            quantity,
            trade_amount,
            cash_amount: Decimal::ZERO,
            trade_cash_rate: None,
            cash_currency: None,
        }
    }

    /// The currency cash settles in; the trade currency when none is set.
    pub fn settlement_currency(&self) -> &str {
        self.cash_currency.as_deref().unwrap_or(&self.trade_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_round_trips_through_its_code() {
        for trn_type in [
            TrnType::Buy,
            TrnType::Sell,
            TrnType::Dividend,
            TrnType::Split,
            TrnType::Deposit,
            TrnType::Withdrawal,
            TrnType::Fee,
            TrnType::Tax,
            TrnType::Add,
        ] {
            assert_eq!(trn_type.as_str().parse::<TrnType>().unwrap(), trn_type);
        }
        assert!("SHORT".parse::<TrnType>().is_err());
    }

    #[test]
    fn cash_direction_table() {
        assert_eq!(TrnType::Sell.cash_direction(), CashDirection::Credit);
        assert_eq!(TrnType::Dividend.cash_direction(), CashDirection::Credit);
        assert_eq!(TrnType::Buy.cash_direction(), CashDirection::Debit);
        assert_eq!(TrnType::Split.cash_direction(), CashDirection::Nil);
        assert_eq!(TrnType::Add.cash_direction(), CashDirection::Nil);
    }
}
