use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::records::Debt;
use crate::types::OverdueMode;

/// engine for deciding whether, and by how much, a debt is late
pub struct OverdueDetector {
    pub mode: OverdueMode,
    pub block_days: i64,
}

impl OverdueDetector {
    pub fn new(mode: OverdueMode, block_days: i64) -> Self {
        Self { mode, block_days }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.overdue_mode, config.late_block_days)
    }

    /// late units contributed by one debt
    ///
    /// Zero for a fully paid debt. A late debt contributes every elapsed
    /// unit, not one unit per debt; store totals sum these uncapped.
    pub fn late_units(&self, debt: &Debt, paid: Money, now: DateTime<Utc>) -> u32 {
        let remaining = debt.debt_sum - paid;
        if !remaining.is_positive() {
            return 0;
        }

        match self.mode {
            OverdueMode::ThirtyDayBlocks => {
                let days = (now - debt.debt_date).num_days();
                if days <= 0 {
                    0
                } else {
                    (days / self.block_days) as u32
                }
            }
            OverdueMode::PeriodAccurate => {
                let elapsed = months_between(debt.debt_date.date_naive(), now.date_naive())
                    .min(debt.period_months());
                let covered = if debt.monthly_sum.is_positive() {
                    (paid.as_decimal() / debt.monthly_sum.as_decimal())
                        .floor()
                        .to_u32()
                        .unwrap_or(0)
                } else {
                    0
                };
                elapsed.saturating_sub(covered)
            }
        }
    }

    /// true iff the sale date is in the past and the debt still carries
    /// a positive remaining balance
    pub fn is_overdue(&self, debt: &Debt, paid: Money, today: NaiveDate) -> bool {
        debt.debt_date.date_naive() < today && (debt.debt_sum - paid).is_positive()
    }
}

/// whole calendar months elapsed from `from` to `to`, zero when `to`
/// is not after `from`
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}
