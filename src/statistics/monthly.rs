use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::storage::LedgerStore;
use crate::types::StoreId;

/// new-debt and payment sums for one day of the month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DayTotals {
    pub debts: Money,
    pub payments: Money,
}

/// calendar-month report for one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub month: u32,
    pub total_new_debts: usize,
    pub total_debt_amount: Money,
    pub total_payments: usize,
    pub total_payment_amount: Money,
    /// payments received minus credit issued within the month
    pub net_balance: Money,
    /// keyed by day of month; days with no activity are absent
    pub daily_breakdown: BTreeMap<u32, DayTotals>,
}

/// partition the store's debts and payments of one calendar month by
/// day of month
pub fn monthly_breakdown<S: LedgerStore + ?Sized>(
    store: &S,
    store_id: StoreId,
    year: i32,
    month: u32,
) -> Result<MonthlyBreakdown> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth { month });
    }
    store.find_store(store_id)?;

    let debts = store.debts_for_store(store_id)?;

    let mut daily_breakdown: BTreeMap<u32, DayTotals> = BTreeMap::new();
    let mut total_new_debts = 0;
    let mut total_debt_amount = Money::ZERO;
    let mut total_payments = 0;
    let mut total_payment_amount = Money::ZERO;

    for debt in &debts {
        let debt_day = debt.debt_date.date_naive();
        if debt_day.year() == year && debt_day.month() == month {
            let entry = daily_breakdown.entry(debt_day.day()).or_default();
            entry.debts += debt.debt_sum;
            total_new_debts += 1;
            total_debt_amount += debt.debt_sum;
        }

        for payment in store.payments_for_debt(debt.id)? {
            if payment.date.year() == year && payment.date.month() == month {
                let entry = daily_breakdown.entry(payment.date.day()).or_default();
                entry.payments += payment.sum;
                total_payments += 1;
                total_payment_amount += payment.sum;
            }
        }
    }

    Ok(MonthlyBreakdown {
        year,
        month,
        total_new_debts,
        total_debt_amount,
        total_payments,
        total_payment_amount,
        net_balance: total_payment_amount - total_debt_amount,
        daily_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Debt, Debtor, Payment, Store};
    use crate::schedule::installment_amount;
    use crate::storage::MemoryStore;
    use crate::types::{DebtId, DebtPeriod, DebtorId, PaymentMethod};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn seeded() -> (MemoryStore, StoreId, DebtorId) {
        let mut backend = MemoryStore::new();
        let store = Store {
            id: Uuid::new_v4(),
            login: "store1".to_string(),
            wallet: Money::ZERO,
            is_active: true,
        };
        let debtor = Debtor {
            id: Uuid::new_v4(),
            store_id: store.id,
            full_name: "Karim Yusupov".to_string(),
            phone_number: "+998971112233".to_string(),
            address: "Andijan".to_string(),
            note: None,
        };
        backend.persist_store(store.clone()).unwrap();
        backend.persist_debtor(debtor.clone()).unwrap();
        (backend, store.id, debtor.id)
    }

    fn add_debt_on(
        backend: &mut MemoryStore,
        debtor_id: DebtorId,
        sum: i64,
        year: i32,
        month: u32,
        day: u32,
    ) -> DebtId {
        let debt_sum = Money::from_major(sum);
        let debt = Debt {
            id: Uuid::new_v4(),
            debtor_id,
            debt_date: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
            debt_period: DebtPeriod::SixMonths,
            debt_sum,
            monthly_sum: installment_amount(debt_sum, DebtPeriod::SixMonths).unwrap(),
            description: "goods".to_string(),
        };
        backend.persist_debt(debt.clone()).unwrap();
        debt.id
    }

    fn add_payment_on(
        backend: &mut MemoryStore,
        debt_id: DebtId,
        sum: i64,
        year: i32,
        month: u32,
        day: u32,
    ) {
        backend
            .persist_payment(Payment {
                id: Uuid::new_v4(),
                debt_id,
                sum: Money::from_major(sum),
                date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                method: PaymentMethod::BankTransfer,
            })
            .unwrap();
    }

    #[test]
    fn test_day_buckets_and_net() {
        let (mut backend, store_id, debtor_id) = seeded();
        let debt_id = add_debt_on(&mut backend, debtor_id, 5000, 2024, 5, 10);
        add_payment_on(&mut backend, debt_id, 2000, 2024, 5, 15);

        let report = monthly_breakdown(&backend, store_id, 2024, 5).unwrap();

        assert_eq!(report.daily_breakdown[&10].debts, Money::from_major(5000));
        assert_eq!(report.daily_breakdown[&15].payments, Money::from_major(2000));
        assert_eq!(report.net_balance, Money::from_major(-3000));
        assert_eq!(report.total_new_debts, 1);
        assert_eq!(report.total_payments, 1);
    }

    #[test]
    fn test_same_day_activity_shares_a_bucket() {
        let (mut backend, store_id, debtor_id) = seeded();
        let debt_id = add_debt_on(&mut backend, debtor_id, 1000, 2024, 5, 7);
        add_debt_on(&mut backend, debtor_id, 500, 2024, 5, 7);
        add_payment_on(&mut backend, debt_id, 300, 2024, 5, 7);

        let report = monthly_breakdown(&backend, store_id, 2024, 5).unwrap();
        let day = report.daily_breakdown[&7];

        assert_eq!(day.debts, Money::from_major(1500));
        assert_eq!(day.payments, Money::from_major(300));
    }

    #[test]
    fn test_other_months_are_ignored() {
        let (mut backend, store_id, debtor_id) = seeded();
        // debt issued in april, paid against in may
        let debt_id = add_debt_on(&mut backend, debtor_id, 4000, 2024, 4, 20);
        add_payment_on(&mut backend, debt_id, 1000, 2024, 5, 2);
        add_payment_on(&mut backend, debt_id, 1000, 2024, 6, 2);

        let report = monthly_breakdown(&backend, store_id, 2024, 5).unwrap();

        assert_eq!(report.total_new_debts, 0);
        assert_eq!(report.total_debt_amount, Money::ZERO);
        assert_eq!(report.total_payment_amount, Money::from_major(1000));
        assert_eq!(report.net_balance, Money::from_major(1000));
    }

    #[test]
    fn test_rejects_invalid_month() {
        let (backend, store_id, _) = seeded();
        assert!(matches!(
            monthly_breakdown(&backend, store_id, 2024, 0),
            Err(LedgerError::InvalidMonth { month: 0 })
        ));
        assert!(monthly_breakdown(&backend, store_id, 2024, 13).is_err());
    }
}
