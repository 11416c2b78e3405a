use serde::{Deserialize, Serialize};

use crate::types::OverdueMode;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// how late units are counted for unpaid debts
    pub overdue_mode: OverdueMode,
    /// length of one late block in days
    pub late_block_days: i64,
    /// how many days before the monthly due day a reminder fires
    pub reminder_window_days: u32,
}

impl LedgerConfig {
    /// default configuration: 30-day late blocks, 3-day reminders
    pub fn standard() -> Self {
        Self {
            overdue_mode: OverdueMode::ThirtyDayBlocks,
            late_block_days: 30,
            reminder_window_days: 3,
        }
    }

    /// count lateness against the debt's own installment boundaries
    pub fn period_accurate() -> Self {
        Self {
            overdue_mode: OverdueMode::PeriodAccurate,
            ..Self::standard()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::standard()
    }
}
