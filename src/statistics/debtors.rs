use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::overdue::OverdueDetector;
use crate::payments::paid_total;
use crate::storage::LedgerStore;
use crate::types::{DebtorId, StoreId};

/// financial position of one debtor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtorSummary {
    pub debtor_id: DebtorId,
    pub full_name: String,
    pub phone_number: String,
    pub total_debt: Money,
    pub total_paid: Money,
    pub remaining_debt: Money,
    /// at least one debt is past its sale date with a balance remaining
    pub has_overdue: bool,
    /// owes more than has been paid
    pub is_active: bool,
}

/// store-wide debtor rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDebtorStatistics {
    pub total_debtors: usize,
    pub active_debtors: usize,
    pub overdue_debtors: usize,
    pub total_debt_amount: Money,
    pub total_paid_amount: Money,
    pub remaining_debt: Money,
    pub debtor_details: Vec<DebtorSummary>,
}

/// Roll up every debtor of a store.
///
/// Read-only and idempotent: two calls with no intervening writes
/// produce identical output.
pub fn debtor_statistics<S: LedgerStore + ?Sized>(
    store: &S,
    detector: &OverdueDetector,
    store_id: StoreId,
    today: NaiveDate,
) -> Result<StoreDebtorStatistics> {
    store.find_store(store_id)?;

    let debtors = store.debtors_for_store(store_id)?;

    let mut active_debtors = 0;
    let mut overdue_debtors = 0;
    let mut total_debt_amount = Money::ZERO;
    let mut total_paid_amount = Money::ZERO;
    let mut debtor_details = Vec::with_capacity(debtors.len());

    for debtor in &debtors {
        let mut total_debt = Money::ZERO;
        let mut total_paid = Money::ZERO;
        let mut has_overdue = false;

        for debt in store.debts_for_debtor(debtor.id)? {
            let paid = paid_total(&store.payments_for_debt(debt.id)?);
            total_debt += debt.debt_sum;
            total_paid += paid;
            if detector.is_overdue(&debt, paid, today) {
                has_overdue = true;
            }
        }

        let is_active = total_debt > total_paid;
        if is_active {
            active_debtors += 1;
        }
        if has_overdue {
            overdue_debtors += 1;
        }
        total_debt_amount += total_debt;
        total_paid_amount += total_paid;

        debtor_details.push(DebtorSummary {
            debtor_id: debtor.id,
            full_name: debtor.full_name.clone(),
            phone_number: debtor.phone_number.clone(),
            total_debt,
            total_paid,
            remaining_debt: total_debt - total_paid,
            has_overdue,
            is_active,
        });
    }

    Ok(StoreDebtorStatistics {
        total_debtors: debtors.len(),
        active_debtors,
        overdue_debtors,
        total_debt_amount,
        total_paid_amount,
        remaining_debt: total_debt_amount - total_paid_amount,
        debtor_details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::records::{Debt, Debtor, Payment, Store};
    use crate::schedule::installment_amount;
    use crate::storage::MemoryStore;
    use crate::types::{DebtId, DebtPeriod, PaymentMethod};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn seeded() -> (MemoryStore, StoreId) {
        let mut backend = MemoryStore::new();
        let store = Store {
            id: Uuid::new_v4(),
            login: "store1".to_string(),
            wallet: Money::ZERO,
            is_active: true,
        };
        backend.persist_store(store.clone()).unwrap();
        (backend, store.id)
    }

    fn add_debtor(backend: &mut MemoryStore, store_id: StoreId, name: &str) -> DebtorId {
        let debtor = Debtor {
            id: Uuid::new_v4(),
            store_id,
            full_name: name.to_string(),
            phone_number: "+998901110022".to_string(),
            address: "Namangan".to_string(),
            note: None,
        };
        backend.persist_debtor(debtor.clone()).unwrap();
        debtor.id
    }

    fn add_debt(backend: &mut MemoryStore, debtor_id: DebtorId, sum: i64) -> DebtId {
        let debt_sum = Money::from_major(sum);
        let debt = Debt {
            id: Uuid::new_v4(),
            debtor_id,
            debt_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            debt_period: DebtPeriod::ThreeMonths,
            debt_sum,
            monthly_sum: installment_amount(debt_sum, DebtPeriod::ThreeMonths).unwrap(),
            description: "goods".to_string(),
        };
        backend.persist_debt(debt.clone()).unwrap();
        debt.id
    }

    fn add_payment(backend: &mut MemoryStore, debt_id: DebtId, sum: i64) {
        backend
            .persist_payment(Payment {
                id: Uuid::new_v4(),
                debt_id,
                sum: Money::from_major(sum),
                date: chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                method: PaymentMethod::Cash,
            })
            .unwrap();
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn detector() -> OverdueDetector {
        OverdueDetector::from_config(&LedgerConfig::standard())
    }

    #[test]
    fn test_two_debts_partially_paid_rollup() {
        let (mut backend, store_id) = seeded();
        let debtor = add_debtor(&mut backend, store_id, "Sardor Nazarov");
        let d1 = add_debt(&mut backend, debtor, 1000);
        let d2 = add_debt(&mut backend, debtor, 2000);
        add_payment(&mut backend, d1, 1000);
        add_payment(&mut backend, d2, 500);

        let stats = debtor_statistics(&backend, &detector(), store_id, today()).unwrap();

        assert_eq!(stats.total_debtors, 1);
        let summary = &stats.debtor_details[0];
        assert_eq!(summary.total_debt, Money::from_major(3000));
        assert_eq!(summary.total_paid, Money::from_major(1500));
        assert_eq!(summary.remaining_debt, Money::from_major(1500));
        assert!(summary.is_active);
        assert!(summary.has_overdue);
    }

    #[test]
    fn test_settled_debtor_is_inactive() {
        let (mut backend, store_id) = seeded();
        let debtor = add_debtor(&mut backend, store_id, "Nodira Azimova");
        let debt = add_debt(&mut backend, debtor, 1000);
        add_payment(&mut backend, debt, 1000);

        let stats = debtor_statistics(&backend, &detector(), store_id, today()).unwrap();

        assert_eq!(stats.active_debtors, 0);
        assert_eq!(stats.overdue_debtors, 0);
        assert!(!stats.debtor_details[0].is_active);
        assert_eq!(stats.remaining_debt, Money::ZERO);
    }

    #[test]
    fn test_store_wide_counts() {
        let (mut backend, store_id) = seeded();

        let paid_up = add_debtor(&mut backend, store_id, "Paid Up");
        let debt = add_debt(&mut backend, paid_up, 500);
        add_payment(&mut backend, debt, 500);

        let behind = add_debtor(&mut backend, store_id, "Behind");
        add_debt(&mut backend, behind, 700);

        let stats = debtor_statistics(&backend, &detector(), store_id, today()).unwrap();

        assert_eq!(stats.total_debtors, 2);
        assert_eq!(stats.active_debtors, 1);
        assert_eq!(stats.overdue_debtors, 1);
        assert_eq!(stats.total_debt_amount, Money::from_major(1200));
        assert_eq!(stats.total_paid_amount, Money::from_major(1000));
        assert_eq!(stats.remaining_debt, Money::from_major(200));
    }

    #[test]
    fn test_idempotent_with_no_intervening_writes() {
        let (mut backend, store_id) = seeded();
        let debtor = add_debtor(&mut backend, store_id, "Stable");
        let debt = add_debt(&mut backend, debtor, 900);
        add_payment(&mut backend, debt, 300);

        let first = debtor_statistics(&backend, &detector(), store_id, today()).unwrap();
        let second = debtor_statistics(&backend, &detector(), store_id, today()).unwrap();

        assert_eq!(first, second);
    }
}
