use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::records::Debt;
use crate::types::DebtPeriod;

/// Derive the fixed per-period installment for a credit sale.
///
/// The amount is `floor(debt_sum / months)` in whole currency units,
/// computed once at debt creation. Any edit to the total or the period
/// must go back through this function; the stored installment is never
/// recomputed implicitly.
pub fn installment_amount(debt_sum: Money, period: DebtPeriod) -> Result<Money> {
    if !debt_sum.is_positive() {
        return Err(LedgerError::InvalidDebtSum { sum: debt_sum });
    }
    Ok(debt_sum.div_floor(period.months()))
}

/// the next amount due on a debt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpcomingInstallment {
    /// what the debtor owes next: a full installment, or the smaller
    /// remainder when less than one installment is left
    pub amount: Money,
    /// the fixed monthly installment
    pub monthly_sum: Money,
    /// how much of the debt is still unpaid
    pub remaining: Money,
}

/// compute the next amount due given the total already paid
pub fn upcoming_installment(debt: &Debt, paid: Money) -> UpcomingInstallment {
    let remaining = (debt.debt_sum - paid).max(Money::ZERO);
    UpcomingInstallment {
        amount: remaining.min(debt.monthly_sum),
        monthly_sum: debt.monthly_sum,
        remaining,
    }
}
