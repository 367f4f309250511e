use num_traits::Zero;
use rust_decimal::Decimal;

use crate::transactions::{CashDirection, Trn};

/// Computes the signed cash effect of a transaction: credits positive,
/// debits negative. Downstream cash-balance aggregation sums these
/// directly, so the sign convention is load-bearing.
#[derive(Debug, Default, Clone)]
pub struct CashImpactResolver;

impl CashImpactResolver {
    pub fn new() -> Self {
        CashImpactResolver
    }

    /// Cash impact using the transaction's own trade amount.
    pub fn cash_impact(&self, trn: &Trn) -> Decimal {
        self.cash_impact_for_amount(trn, trn.trade_amount)
    }

    /// Cash impact for an explicit trade amount. A pre-set non-zero
    /// `cash_amount` on the transaction is authoritative and returned
    /// unchanged.
    pub fn cash_impact_for_amount(&self, trn: &Trn, trade_amount: Decimal) -> Decimal {
        if !trn.cash_amount.is_zero() {
            return trn.cash_amount;
        }
        let rate = match trn.trade_cash_rate {
            Some(rate) if !rate.is_zero() => rate,
            _ => Decimal::ONE,
        };
        match trn.trn_type.cash_direction() {
            CashDirection::Credit => trade_amount.abs() / rate,
            CashDirection::Debit => -(trade_amount.abs() / rate),
            CashDirection::Nil => Decimal::ZERO,
        }
    }
}
