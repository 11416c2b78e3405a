use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::records::{Debt, DebtImage, Debtor, Payment, Store};
use crate::types::{DebtId, DebtorId, StoreId};

use super::LedgerStore;

/// In-memory reference backend.
///
/// Collections keep insertion order, which is what gives
/// `payments_for_debt` its first-recorded-payment semantics. Atomic
/// units are implemented by snapshotting the whole store and restoring
/// it when the unit fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    stores: Vec<Store>,
    debtors: Vec<Debtor>,
    debts: Vec<Debt>,
    payments: Vec<Payment>,
    images: Vec<DebtImage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// serialize the full backend state
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// restore a backend from serialized state
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn upsert<T, F>(items: &mut Vec<T>, item: T, same_id: F)
    where
        F: Fn(&T) -> bool,
    {
        match items.iter().position(|existing| same_id(existing)) {
            Some(index) => items[index] = item,
            None => items.push(item),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn find_store(&self, id: StoreId) -> Result<Store> {
        self.stores
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(LedgerError::StoreNotFound { id })
    }

    fn find_debtor(&self, id: DebtorId) -> Result<Debtor> {
        self.debtors
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(LedgerError::DebtorNotFound { id })
    }

    fn find_debt(&self, id: DebtId) -> Result<Debt> {
        self.debts
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(LedgerError::DebtNotFound { id })
    }

    fn debtors_for_store(&self, store_id: StoreId) -> Result<Vec<Debtor>> {
        Ok(self
            .debtors
            .iter()
            .filter(|d| d.store_id == store_id)
            .cloned()
            .collect())
    }

    fn debts_for_debtor(&self, debtor_id: DebtorId) -> Result<Vec<Debt>> {
        Ok(self
            .debts
            .iter()
            .filter(|d| d.debtor_id == debtor_id)
            .cloned()
            .collect())
    }

    fn debts_for_store(&self, store_id: StoreId) -> Result<Vec<Debt>> {
        let debtor_ids: Vec<DebtorId> = self
            .debtors
            .iter()
            .filter(|d| d.store_id == store_id)
            .map(|d| d.id)
            .collect();

        Ok(self
            .debts
            .iter()
            .filter(|d| debtor_ids.contains(&d.debtor_id))
            .cloned()
            .collect())
    }

    fn all_debts(&self) -> Result<Vec<Debt>> {
        Ok(self.debts.clone())
    }

    fn payments_for_debt(&self, debt_id: DebtId) -> Result<Vec<Payment>> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.debt_id == debt_id)
            .cloned()
            .collect())
    }

    fn images_for_debt(&self, debt_id: DebtId) -> Result<Vec<DebtImage>> {
        Ok(self
            .images
            .iter()
            .filter(|i| i.debt_id == debt_id)
            .cloned()
            .collect())
    }

    fn persist_store(&mut self, store: Store) -> Result<()> {
        let id = store.id;
        Self::upsert(&mut self.stores, store, |s| s.id == id);
        Ok(())
    }

    fn persist_debtor(&mut self, debtor: Debtor) -> Result<()> {
        let id = debtor.id;
        Self::upsert(&mut self.debtors, debtor, |d| d.id == id);
        Ok(())
    }

    fn persist_debt(&mut self, debt: Debt) -> Result<()> {
        let id = debt.id;
        Self::upsert(&mut self.debts, debt, |d| d.id == id);
        Ok(())
    }

    fn persist_payment(&mut self, payment: Payment) -> Result<()> {
        let id = payment.id;
        Self::upsert(&mut self.payments, payment, |p| p.id == id);
        Ok(())
    }

    fn persist_image(&mut self, image: DebtImage) -> Result<()> {
        let id = image.id;
        Self::upsert(&mut self.images, image, |i| i.id == id);
        Ok(())
    }

    fn remove_debt(&mut self, id: DebtId) -> Result<()> {
        if !self.debts.iter().any(|d| d.id == id) {
            return Err(LedgerError::DebtNotFound { id });
        }
        self.debts.retain(|d| d.id != id);
        self.payments.retain(|p| p.debt_id != id);
        self.images.retain(|i| i.debt_id != id);
        Ok(())
    }

    fn run_atomic(
        &mut self,
        work: &mut dyn FnMut(&mut dyn LedgerStore) -> Result<()>,
    ) -> Result<()> {
        let snapshot = self.clone();
        match work(self) {
            Ok(()) => Ok(()),
            Err(err) => {
                *self = snapshot;
                Err(err)
            }
        }
    }
}
