use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::storage::LedgerStore;
use crate::types::{DebtId, DebtorId, StoreId};

/// one debt due for a reminder on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderEntry {
    pub debtor_id: DebtorId,
    pub debtor_name: String,
    pub phone_number: String,
    pub debt_id: DebtId,
    pub period_months: u32,
    pub monthly_sum: Money,
    /// date of the first recorded payment, the anchor for the monthly
    /// due day
    pub first_payment_date: NaiveDate,
    pub first_payment_sum: Money,
}

/// Reminder feed for one store and one day.
///
/// Every debt is anchored on its *first* recorded payment; debts with no
/// payments yet never appear. A debt is included when the query date
/// lands within `window_days` after the due day implied by that anchor:
/// the year difference stays in [-1, 1], the month difference stays
/// within the debt's period, and the anchor's day-of-month falls at most
/// `window_days` before the query's. Within the anchor month itself only
/// an exact day match fires.
pub fn daily_reminders<S: LedgerStore + ?Sized>(
    store: &S,
    store_id: StoreId,
    date: NaiveDate,
    window_days: u32,
) -> Result<Vec<ReminderEntry>> {
    store.find_store(store_id)?;

    let mut result = Vec::new();
    for debtor in store.debtors_for_store(store_id)? {
        for debt in store.debts_for_debtor(debtor.id)? {
            let payments = store.payments_for_debt(debt.id)?;
            let first = match payments.first() {
                Some(payment) => payment,
                None => continue,
            };

            let year_diff = date.year() - first.date.year();
            if !(-1..=1).contains(&year_diff) {
                continue;
            }

            let month_diff = date.month() as i32 - first.date.month() as i32;
            if month_diff < 0 || month_diff > debt.period_months() as i32 {
                continue;
            }

            let day_diff = first.date.day() as i32 - date.day() as i32;
            if day_diff < -(window_days as i32) || day_diff > 0 {
                continue;
            }
            // the anchor month itself: only the exact due day fires
            if month_diff == 0 && day_diff < 0 {
                continue;
            }

            result.push(ReminderEntry {
                debtor_id: debtor.id,
                debtor_name: debtor.full_name.clone(),
                phone_number: debtor.phone_number.clone(),
                debt_id: debt.id,
                period_months: debt.period_months(),
                monthly_sum: debt.monthly_sum,
                first_payment_date: first.date,
                first_payment_sum: first.sum,
            });
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Debt, Debtor, Payment, Store};
    use crate::schedule::installment_amount;
    use crate::storage::MemoryStore;
    use crate::types::{DebtPeriod, PaymentMethod};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    struct Fixture {
        backend: MemoryStore,
        store_id: StoreId,
        debtor_id: DebtorId,
    }

    fn fixture() -> Fixture {
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
            full_name: "Dilshod Tashkentov".to_string(),
            phone_number: "+998903332211".to_string(),
            address: "Bukhara".to_string(),
            note: None,
        };
        backend.persist_store(store.clone()).unwrap();
        backend.persist_debtor(debtor.clone()).unwrap();
        Fixture {
            backend,
            store_id: store.id,
            debtor_id: debtor.id,
        }
    }

    fn add_debt_with_first_payment(
        fx: &mut Fixture,
        period: DebtPeriod,
        first_payment: NaiveDate,
    ) -> DebtId {
        let debt_sum = Money::from_major(600);
        let debt = Debt {
            id: Uuid::new_v4(),
            debtor_id: fx.debtor_id,
            debt_date: Utc
                .with_ymd_and_hms(
                    first_payment.year(),
                    first_payment.month(),
                    1,
                    0,
                    0,
                    0,
                )
                .unwrap(),
            debt_period: period,
            debt_sum,
            monthly_sum: installment_amount(debt_sum, period).unwrap(),
            description: "goods".to_string(),
        };
        fx.backend.persist_debt(debt.clone()).unwrap();
        fx.backend
            .persist_payment(Payment {
                id: Uuid::new_v4(),
                debt_id: debt.id,
                sum: Money::from_major(100),
                date: first_payment,
                method: PaymentMethod::Cash,
            })
            .unwrap();
        debt.id
    }

    #[test]
    fn test_due_day_two_days_back_two_months_in_is_included() {
        let mut fx = fixture();
        // first payment on june 10th, querying august 12th: month_diff 2,
        // day_diff -2
        let debt_id = add_debt_with_first_payment(
            &mut fx,
            DebtPeriod::SixMonths,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        );

        let query = NaiveDate::from_ymd_opt(2024, 8, 12).unwrap();
        let entries = daily_reminders(&fx.backend, fx.store_id, query, 3).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debt_id, debt_id);
        assert_eq!(entries[0].period_months, 6);
    }

    #[test]
    fn test_due_day_after_query_is_excluded() {
        let mut fx = fixture();
        // first payment on june 13th, querying august 12th: day_diff +1
        add_debt_with_first_payment(
            &mut fx,
            DebtPeriod::SixMonths,
            NaiveDate::from_ymd_opt(2024, 6, 13).unwrap(),
        );

        let query = NaiveDate::from_ymd_opt(2024, 8, 12).unwrap();
        assert!(daily_reminders(&fx.backend, fx.store_id, query, 3)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_exact_due_day_is_included() {
        let mut fx = fixture();
        add_debt_with_first_payment(
            &mut fx,
            DebtPeriod::ThreeMonths,
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        );

        let query = NaiveDate::from_ymd_opt(2024, 7, 12).unwrap();
        assert_eq!(
            daily_reminders(&fx.backend, fx.store_id, query, 3)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_anchor_month_only_fires_on_exact_day() {
        let mut fx = fixture();
        // month_diff 0 and day_diff < 0: degenerate case, excluded
        add_debt_with_first_payment(
            &mut fx,
            DebtPeriod::SixMonths,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        );

        let query = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        assert!(daily_reminders(&fx.backend, fx.store_id, query, 3)
            .unwrap()
            .is_empty());

        // exact day match in the anchor month still fires
        let query = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(
            daily_reminders(&fx.backend, fx.store_id, query, 3)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_past_period_end_is_excluded() {
        let mut fx = fixture();
        // 3-month debt, querying 4 months after the anchor
        add_debt_with_first_payment(
            &mut fx,
            DebtPeriod::ThreeMonths,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        );

        let query = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(daily_reminders(&fx.backend, fx.store_id, query, 3)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_debt_without_payments_never_appears() {
        let mut fx = fixture();
        let debt_sum = Money::from_major(600);
        fx.backend
            .persist_debt(Debt {
                id: Uuid::new_v4(),
                debtor_id: fx.debtor_id,
                debt_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                debt_period: DebtPeriod::SixMonths,
                debt_sum,
                monthly_sum: installment_amount(debt_sum, DebtPeriod::SixMonths).unwrap(),
                description: "no payments yet".to_string(),
            })
            .unwrap();

        let query = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(daily_reminders(&fx.backend, fx.store_id, query, 3)
            .unwrap()
            .is_empty());
    }
}
