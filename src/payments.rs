use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::records::{Debt, Payment};
use crate::types::{DebtId, PaymentMethod};

/// payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub debt_id: DebtId,
    pub amount: Money,
    pub date: NaiveDate,
    pub method: PaymentMethod,
}

/// result of applying a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    /// balance after the payment, always derived from the payment history
    pub remaining_balance: Money,
    /// true when this payment brought the balance to zero
    pub settled: bool,
}

/// total amount applied against a debt
pub fn paid_total(payments: &[Payment]) -> Money {
    payments.iter().map(|p| p.sum).sum()
}

/// remaining balance of a debt
///
/// Always `debt_sum - paid`. The total sum is immutable history; the
/// balance is never stored or decremented in place.
pub fn remaining_balance(debt: &Debt, payments: &[Payment]) -> Money {
    debt.debt_sum - paid_total(payments)
}

/// validate a payment amount against the debt's remaining balance
pub fn validate_amount(amount: Money, remaining: Money) -> Result<()> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidPaymentAmount { amount });
    }
    if amount > remaining {
        return Err(LedgerError::PaymentExceedsBalance {
            remaining,
            requested: amount,
        });
    }
    Ok(())
}
