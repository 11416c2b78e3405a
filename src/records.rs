use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{
    DebtId, DebtImageId, DebtPeriod, DebtorId, PaymentId, PaymentMethod, StoreId,
};

/// one installment credit sale
///
/// `monthly_sum` is derived by the schedule calculator when the debt is
/// created and stays consistent with `debt_sum` / `debt_period` through
/// every edit. Remaining balance is never stored; it is always derived
/// from the payments applied against the debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub debtor_id: DebtorId,
    pub debt_date: DateTime<Utc>,
    pub debt_period: DebtPeriod,
    pub debt_sum: Money,
    pub monthly_sum: Money,
    pub description: String,
}

impl Debt {
    /// number of monthly installments
    pub fn period_months(&self) -> u32 {
        self.debt_period.months()
    }
}

/// a single amount applied against one debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub debt_id: DebtId,
    pub sum: Money,
    pub date: NaiveDate,
    pub method: PaymentMethod,
}

/// the buyer who owes on one or more debts, scoped to one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    pub id: DebtorId,
    pub store_id: StoreId,
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub note: Option<String>,
}

/// the merchant entity owning debtors and issuing debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub login: String,
    /// denormalized aggregate refreshed from debtor statistics
    pub wallet: Money,
    pub is_active: bool,
}

/// metadata for an uploaded proof image attached to a debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtImage {
    pub id: DebtImageId,
    pub debt_id: DebtId,
    pub path: String,
    pub created_at: DateTime<Utc>,
}
