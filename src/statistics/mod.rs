mod daily;
mod debtors;
mod monthly;

pub use daily::{daily_reminders, ReminderEntry};
pub use debtors::{debtor_statistics, DebtorSummary, StoreDebtorStatistics};
pub use monthly::{monthly_breakdown, DayTotals, MonthlyBreakdown};

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::storage::LedgerStore;
use crate::types::StoreId;

/// headline numbers for a store's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_debtors: usize,
    /// sum of every debt's total sum across the store
    pub total_debt_amount: Money,
}

/// debtor count and issued-credit total for one store, single pass
pub fn dashboard_summary<S: LedgerStore + ?Sized>(
    store: &S,
    store_id: StoreId,
) -> Result<DashboardSummary> {
    store.find_store(store_id)?;

    let total_debtors = store.debtors_for_store(store_id)?.len();
    let total_debt_amount = store
        .debts_for_store(store_id)?
        .iter()
        .map(|d| d.debt_sum)
        .sum();

    Ok(DashboardSummary {
        total_debtors,
        total_debt_amount,
    })
}

/// total issued credit across every store in the backend
pub fn global_total_debt<S: LedgerStore + ?Sized>(store: &S) -> Result<Money> {
    Ok(store.all_debts()?.iter().map(|d| d.debt_sum).sum())
}
