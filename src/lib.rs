pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod overdue;
pub mod payments;
pub mod records;
pub mod schedule;
pub mod statistics;
pub mod storage;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use ledger::{CreateDebt, DebtPatch, Ledger};
pub use overdue::OverdueDetector;
pub use payments::{PaymentReceipt, PaymentRequest};
pub use records::{Debt, DebtImage, Debtor, Payment, Store};
pub use schedule::{installment_amount, upcoming_installment, UpcomingInstallment};
pub use statistics::{
    DashboardSummary, DayTotals, DebtorSummary, MonthlyBreakdown, ReminderEntry,
    StoreDebtorStatistics,
};
pub use storage::{LedgerStore, MemoryStore};
pub use types::{
    DebtId, DebtImageId, DebtPeriod, DebtorId, OverdueMode, PaymentId, PaymentMethod, StoreId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
