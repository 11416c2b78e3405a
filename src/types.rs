use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// unique identifier for a store
pub type StoreId = Uuid;

/// unique identifier for a debtor
pub type DebtorId = Uuid;

/// unique identifier for a debt
pub type DebtId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// unique identifier for a debt image
pub type DebtImageId = Uuid;

/// allowed installment periods for a credit sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl DebtPeriod {
    /// number of monthly installments in the period
    pub fn months(&self) -> u32 {
        match self {
            DebtPeriod::OneMonth => 1,
            DebtPeriod::ThreeMonths => 3,
            DebtPeriod::SixMonths => 6,
            DebtPeriod::TwelveMonths => 12,
        }
    }

    /// parse a month count into an allowed period
    pub fn from_months(months: u32) -> Result<Self> {
        match months {
            1 => Ok(DebtPeriod::OneMonth),
            3 => Ok(DebtPeriod::ThreeMonths),
            6 => Ok(DebtPeriod::SixMonths),
            12 => Ok(DebtPeriod::TwelveMonths),
            _ => Err(LedgerError::InvalidPeriod { months }),
        }
    }
}

/// how a payment was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

/// how late units are counted for an unpaid debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverdueMode {
    /// one unit per elapsed 30-day block since the sale date
    ThirtyDayBlocks,
    /// one unit per elapsed installment period not covered by payments
    PeriodAccurate,
}
