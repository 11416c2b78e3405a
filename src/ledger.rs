use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::overdue::OverdueDetector;
use crate::payments::{paid_total, remaining_balance, validate_amount, PaymentReceipt, PaymentRequest};
use crate::records::{Debt, DebtImage, Payment};
use crate::schedule::{installment_amount, upcoming_installment, UpcomingInstallment};
use crate::statistics::{
    daily_reminders, dashboard_summary, debtor_statistics, global_total_debt, monthly_breakdown,
    DashboardSummary, MonthlyBreakdown, ReminderEntry, StoreDebtorStatistics,
};
use crate::storage::LedgerStore;
use crate::types::{DebtId, DebtPeriod, DebtorId, StoreId};

/// request to open a new installment credit sale
#[derive(Debug, Clone)]
pub struct CreateDebt {
    pub debtor_id: DebtorId,
    pub debt_date: DateTime<Utc>,
    pub debt_period: DebtPeriod,
    pub debt_sum: Money,
    pub description: String,
}

/// partial update for an existing debt
#[derive(Debug, Clone, Default)]
pub struct DebtPatch {
    pub debt_date: Option<DateTime<Utc>>,
    pub debt_period: Option<DebtPeriod>,
    pub debt_sum: Option<Money>,
    pub description: Option<String>,
}

/// Core ledger over a persistence collaborator.
///
/// Owns the storage backend, the configuration and an event log.
/// Every operation that needs "now" takes a time provider so callers
/// control the clock.
pub struct Ledger<S: LedgerStore> {
    pub config: LedgerConfig,
    pub store: S,
    pub events: EventStore,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::standard())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self {
            config,
            store,
            events: EventStore::new(),
        }
    }

    fn detector(&self) -> OverdueDetector {
        OverdueDetector::from_config(&self.config)
    }

    /// open a credit sale: derive the installment and persist the debt
    pub fn create_debt(&mut self, request: CreateDebt, time_provider: &SafeTimeProvider) -> Result<Debt> {
        self.store.find_debtor(request.debtor_id)?;

        let monthly_sum = installment_amount(request.debt_sum, request.debt_period)?;
        let debt = Debt {
            id: Uuid::new_v4(),
            debtor_id: request.debtor_id,
            debt_date: request.debt_date,
            debt_period: request.debt_period,
            debt_sum: request.debt_sum,
            monthly_sum,
            description: request.description,
        };
        self.store.persist_debt(debt.clone())?;

        info!(
            "debt {} created for debtor {}: {} over {} months",
            debt.id,
            debt.debtor_id,
            debt.debt_sum,
            debt.period_months()
        );
        self.events.emit(Event::DebtCreated {
            debt_id: debt.id,
            debtor_id: debt.debtor_id,
            debt_sum: debt.debt_sum,
            monthly_sum: debt.monthly_sum,
            period_months: debt.period_months(),
            timestamp: time_provider.now(),
        });

        Ok(debt)
    }

    /// Patch a debt.
    ///
    /// Changing the total or the period re-derives the installment; the
    /// stored `monthly_sum` can never drift from the schedule rule.
    pub fn update_debt(
        &mut self,
        debt_id: DebtId,
        patch: DebtPatch,
        time_provider: &SafeTimeProvider,
    ) -> Result<Debt> {
        let mut debt = self.store.find_debt(debt_id)?;
        let old_monthly_sum = debt.monthly_sum;

        if let Some(date) = patch.debt_date {
            debt.debt_date = date;
        }
        if let Some(description) = patch.description {
            debt.description = description;
        }

        let reschedule = patch.debt_sum.is_some() || patch.debt_period.is_some();
        if let Some(sum) = patch.debt_sum {
            debt.debt_sum = sum;
        }
        if let Some(period) = patch.debt_period {
            debt.debt_period = period;
        }
        if reschedule {
            debt.monthly_sum = installment_amount(debt.debt_sum, debt.debt_period)?;
        }

        self.store.persist_debt(debt.clone())?;

        if debt.monthly_sum != old_monthly_sum {
            debug!(
                "debt {} rescheduled: installment {} -> {}",
                debt.id, old_monthly_sum, debt.monthly_sum
            );
            self.events.emit(Event::DebtRescheduled {
                debt_id: debt.id,
                old_monthly_sum,
                new_monthly_sum: debt.monthly_sum,
                timestamp: time_provider.now(),
            });
        }

        Ok(debt)
    }

    /// remove a debt (with its payments and images) and refresh the
    /// owning store's wallet aggregate
    pub fn delete_debt(&mut self, debt_id: DebtId, time_provider: &SafeTimeProvider) -> Result<Debt> {
        let debt = self.store.find_debt(debt_id)?;
        let debtor = self.store.find_debtor(debt.debtor_id)?;

        self.store.remove_debt(debt_id)?;
        self.events.emit(Event::DebtDeleted {
            debt_id,
            debtor_id: debt.debtor_id,
            timestamp: time_provider.now(),
        });

        // cached aggregates must not survive the deletion
        self.refresh_store_wallet(debtor.store_id, time_provider)?;

        Ok(debt)
    }

    /// derived balance of one debt
    pub fn remaining_balance(&self, debt_id: DebtId) -> Result<Money> {
        let debt = self.store.find_debt(debt_id)?;
        let payments = self.store.payments_for_debt(debt_id)?;
        Ok(remaining_balance(&debt, &payments))
    }

    /// next amount due on one debt
    pub fn upcoming_installment(&self, debt_id: DebtId) -> Result<UpcomingInstallment> {
        let debt = self.store.find_debt(debt_id)?;
        let paid = paid_total(&self.store.payments_for_debt(debt_id)?);
        Ok(upcoming_installment(&debt, paid))
    }

    /// apply a payment against a debt
    pub fn apply_payment(
        &mut self,
        request: PaymentRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let debt = self.store.find_debt(request.debt_id)?;
        let history = self.store.payments_for_debt(debt.id)?;
        let remaining = remaining_balance(&debt, &history);
        validate_amount(request.amount, remaining)?;

        let payment = Payment {
            id: Uuid::new_v4(),
            debt_id: debt.id,
            sum: request.amount,
            date: request.date,
            method: request.method,
        };
        self.store.persist_payment(payment.clone())?;

        self.finish_payment(&debt, payment, remaining, time_provider)
    }

    /// Apply a payment together with its proof image.
    ///
    /// Both writes happen inside one atomic unit: if either fails, no
    /// partial state is visible and the original error propagates.
    pub fn apply_payment_with_image(
        &mut self,
        request: PaymentRequest,
        image_path: String,
        time_provider: &SafeTimeProvider,
    ) -> Result<(PaymentReceipt, DebtImage)> {
        if image_path.is_empty() {
            return Err(LedgerError::EmptyImagePath);
        }
        let debt = self.store.find_debt(request.debt_id)?;
        let history = self.store.payments_for_debt(debt.id)?;
        let remaining = remaining_balance(&debt, &history);
        validate_amount(request.amount, remaining)?;

        let payment = Payment {
            id: Uuid::new_v4(),
            debt_id: debt.id,
            sum: request.amount,
            date: request.date,
            method: request.method,
        };
        let image = DebtImage {
            id: Uuid::new_v4(),
            debt_id: debt.id,
            path: image_path,
            created_at: time_provider.now(),
        };

        {
            let payment = payment.clone();
            let image = image.clone();
            self.store.run_atomic(&mut move |tx| {
                tx.persist_payment(payment.clone())?;
                tx.persist_image(image.clone())
            })?;
        }

        self.events.emit(Event::DebtImageAttached {
            image_id: image.id,
            debt_id: debt.id,
            timestamp: time_provider.now(),
        });
        let receipt = self.finish_payment(&debt, payment, remaining, time_provider)?;

        Ok((receipt, image))
    }

    fn finish_payment(
        &mut self,
        debt: &Debt,
        payment: Payment,
        remaining_before: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let remaining_balance = remaining_before - payment.sum;
        let settled = remaining_balance.is_zero();

        info!(
            "payment {} of {} applied against debt {}, remaining {}",
            payment.id, payment.sum, debt.id, remaining_balance
        );
        self.events.emit(Event::PaymentReceived {
            payment_id: payment.id,
            debt_id: debt.id,
            amount: payment.sum,
            method: payment.method,
            payment_date: payment.date,
            remaining_balance,
            timestamp: time_provider.now(),
        });
        if settled {
            self.events.emit(Event::DebtSettled {
                debt_id: debt.id,
                final_payment: payment.id,
                timestamp: time_provider.now(),
            });
        }

        Ok(PaymentReceipt {
            payment,
            remaining_balance,
            settled,
        })
    }

    /// attach a proof image to a debt inside an atomic unit
    pub fn attach_debt_image(
        &mut self,
        debt_id: DebtId,
        path: String,
        time_provider: &SafeTimeProvider,
    ) -> Result<DebtImage> {
        if path.is_empty() {
            return Err(LedgerError::EmptyImagePath);
        }
        self.store.find_debt(debt_id)?;

        let image = DebtImage {
            id: Uuid::new_v4(),
            debt_id,
            path,
            created_at: time_provider.now(),
        };
        {
            let image = image.clone();
            self.store
                .run_atomic(&mut move |tx| tx.persist_image(image.clone()))?;
        }

        self.events.emit(Event::DebtImageAttached {
            image_id: image.id,
            debt_id,
            timestamp: time_provider.now(),
        });

        Ok(image)
    }

    /// sum of late units across every debt of a store
    pub fn late_units_for_store(
        &self,
        store_id: StoreId,
        time_provider: &SafeTimeProvider,
    ) -> Result<u32> {
        self.store.find_store(store_id)?;

        let detector = self.detector();
        let now = time_provider.now();
        let mut total = 0;
        for debt in self.store.debts_for_store(store_id)? {
            let paid = paid_total(&self.store.payments_for_debt(debt.id)?);
            total += detector.late_units(&debt, paid, now);
        }
        Ok(total)
    }

    /// overdue flag for one debt
    pub fn is_overdue(&self, debt_id: DebtId, time_provider: &SafeTimeProvider) -> Result<bool> {
        let debt = self.store.find_debt(debt_id)?;
        let paid = paid_total(&self.store.payments_for_debt(debt_id)?);
        Ok(self
            .detector()
            .is_overdue(&debt, paid, time_provider.now().date_naive()))
    }

    /// reminder feed for one day
    pub fn daily_reminders(&self, store_id: StoreId, date: NaiveDate) -> Result<Vec<ReminderEntry>> {
        daily_reminders(&self.store, store_id, date, self.config.reminder_window_days)
    }

    /// calendar-month breakdown for a store
    pub fn monthly_breakdown(
        &self,
        store_id: StoreId,
        year: i32,
        month: u32,
    ) -> Result<MonthlyBreakdown> {
        monthly_breakdown(&self.store, store_id, year, month)
    }

    /// per-debtor rollup for a store
    pub fn debtor_statistics(
        &self,
        store_id: StoreId,
        time_provider: &SafeTimeProvider,
    ) -> Result<StoreDebtorStatistics> {
        debtor_statistics(
            &self.store,
            &self.detector(),
            store_id,
            time_provider.now().date_naive(),
        )
    }

    /// headline numbers for a store
    pub fn dashboard_summary(&self, store_id: StoreId) -> Result<DashboardSummary> {
        dashboard_summary(&self.store, store_id)
    }

    /// total issued credit across every store
    pub fn global_total_debt(&self) -> Result<Money> {
        global_total_debt(&self.store)
    }

    /// overwrite the store's wallet aggregate with its total issued debt
    pub fn refresh_store_wallet(
        &mut self,
        store_id: StoreId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Money> {
        let mut store = self.store.find_store(store_id)?;
        let stats = debtor_statistics(
            &self.store,
            &self.detector(),
            store_id,
            time_provider.now().date_naive(),
        )?;

        let old_wallet = store.wallet;
        store.wallet = stats.total_debt_amount;
        self.store.persist_store(store)?;

        info!(
            "store {} wallet refreshed: {} -> {}",
            store_id, old_wallet, stats.total_debt_amount
        );
        self.events.emit(Event::WalletRefreshed {
            store_id,
            old_wallet,
            new_wallet: stats.total_debt_amount,
            timestamp: time_provider.now(),
        });

        Ok(stats.total_debt_amount)
    }

    /// drain events collected by the operations so far
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
