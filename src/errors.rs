use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("store not found: {id}")]
    StoreNotFound { id: Uuid },

    #[error("debtor not found: {id}")]
    DebtorNotFound { id: Uuid },

    #[error("debt not found: {id}")]
    DebtNotFound { id: Uuid },

    #[error("invalid debt sum: {sum}")]
    InvalidDebtSum { sum: Money },

    #[error("invalid debt period: {months} months")]
    InvalidPeriod { months: u32 },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount { amount: Money },

    #[error("payment exceeds remaining balance: remaining {remaining}, requested {requested}")]
    PaymentExceedsBalance {
        remaining: Money,
        requested: Money,
    },

    #[error("invalid month: {month}")]
    InvalidMonth { month: u32 },

    #[error("empty image path")]
    EmptyImagePath,

    #[error("storage error: {message}")]
    Storage { message: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
