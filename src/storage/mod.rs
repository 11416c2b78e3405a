mod memory;

pub use memory::MemoryStore;

use crate::errors::Result;
use crate::records::{Debt, DebtImage, Debtor, Payment, Store};
use crate::types::{DebtId, DebtorId, StoreId};

/// Abstraction over the persistence collaborator.
///
/// The ledger never talks to a database directly; every lookup, listing
/// and write goes through this trait. Backends own atomicity: writes
/// issued inside [`LedgerStore::run_atomic`] either all commit or all
/// roll back, and the unit's resources are released either way.
pub trait LedgerStore {
    fn find_store(&self, id: StoreId) -> Result<Store>;
    fn find_debtor(&self, id: DebtorId) -> Result<Debtor>;
    fn find_debt(&self, id: DebtId) -> Result<Debt>;

    fn debtors_for_store(&self, store_id: StoreId) -> Result<Vec<Debtor>>;
    fn debts_for_debtor(&self, debtor_id: DebtorId) -> Result<Vec<Debt>>;
    fn debts_for_store(&self, store_id: StoreId) -> Result<Vec<Debt>>;
    fn all_debts(&self) -> Result<Vec<Debt>>;
    /// payments in recording order; the first element is the first
    /// recorded payment for the debt
    fn payments_for_debt(&self, debt_id: DebtId) -> Result<Vec<Payment>>;
    fn images_for_debt(&self, debt_id: DebtId) -> Result<Vec<DebtImage>>;

    /// upsert by id
    fn persist_store(&mut self, store: Store) -> Result<()>;
    fn persist_debtor(&mut self, debtor: Debtor) -> Result<()>;
    fn persist_debt(&mut self, debt: Debt) -> Result<()>;
    fn persist_payment(&mut self, payment: Payment) -> Result<()>;
    fn persist_image(&mut self, image: DebtImage) -> Result<()>;

    /// remove a debt together with its payments and images
    fn remove_debt(&mut self, id: DebtId) -> Result<()>;

    /// run a unit of writes atomically: commit on success, roll back and
    /// propagate the original error on any failure
    fn run_atomic(
        &mut self,
        work: &mut dyn FnMut(&mut dyn LedgerStore) -> Result<()>,
    ) -> Result<()>;
}
