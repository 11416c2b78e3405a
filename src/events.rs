use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{DebtId, DebtImageId, DebtorId, PaymentId, PaymentMethod, StoreId};

/// all events that can be emitted by ledger operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // debt lifecycle events
    DebtCreated {
        debt_id: DebtId,
        debtor_id: DebtorId,
        debt_sum: Money,
        monthly_sum: Money,
        period_months: u32,
        timestamp: DateTime<Utc>,
    },
    DebtRescheduled {
        debt_id: DebtId,
        old_monthly_sum: Money,
        new_monthly_sum: Money,
        timestamp: DateTime<Utc>,
    },
    DebtDeleted {
        debt_id: DebtId,
        debtor_id: DebtorId,
        timestamp: DateTime<Utc>,
    },
    DebtSettled {
        debt_id: DebtId,
        final_payment: PaymentId,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentReceived {
        payment_id: PaymentId,
        debt_id: DebtId,
        amount: Money,
        method: PaymentMethod,
        payment_date: NaiveDate,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },

    // image events
    DebtImageAttached {
        image_id: DebtImageId,
        debt_id: DebtId,
        timestamp: DateTime<Utc>,
    },

    // aggregate events
    WalletRefreshed {
        store_id: StoreId,
        old_wallet: Money,
        new_wallet: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
