use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{NewTransaction, Transaction};
use crate::storage::StorageBackend;

/// Key of the persisted slot holding the transaction list.
pub const STORAGE_KEY: &str = "rupeewise_data_v1";

/// Version of the persisted list format. Encoded in [`STORAGE_KEY`].
pub const SCHEMA_VERSION: u8 = 1;

/// State holder for the transaction list, mirrored to a storage slot.
///
/// Every mutation rewrites the whole slot. A failed write is reported to the
/// caller while the in-memory list keeps the change; the next successful
/// mutation persists it.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
}

impl TransactionStore {
    /// Hydrates the store from the persisted slot.
    ///
    /// A missing, unreadable or malformed slot yields an empty store.
    pub fn load(storage: Box<dyn StorageBackend>) -> Self {
        let transactions = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(list) => {
                    tracing::info!(count = list.len(), "transactions loaded");
                    list
                }
                Err(err) => {
                    tracing::warn!(error = %err, "discarding malformed transaction data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read transaction data");
                Vec::new()
            }
        };
        Self {
            transactions,
            storage,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Assigns a fresh identifier, prepends the entry and persists the list.
    pub fn add(&mut self, candidate: NewTransaction) -> Result<&Transaction, LedgerError> {
        let id = self.next_id();
        self.transactions.insert(0, candidate.into_transaction(id));
        tracing::info!(%id, "transaction added");
        self.persist()?;
        Ok(&self.transactions[0])
    }

    /// Removes the entry with `id` if present and persists the list.
    ///
    /// Returns the removed entry; an unknown id leaves the list unchanged.
    pub fn remove(&mut self, id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        let removed = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .map(|index| self.transactions.remove(index));
        match &removed {
            Some(_) => tracing::info!(%id, "transaction removed"),
            None => tracing::debug!(%id, "remove ignored for unknown transaction"),
        }
        self.persist()?;
        Ok(removed)
    }

    /// Deletes the persisted slot, then empties the list.
    ///
    /// If the slot cannot be removed the list is left untouched.
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        let count = self.transactions.len();
        self.storage.remove(STORAGE_KEY)?;
        self.transactions.clear();
        tracing::info!(count, "all transactions cleared");
        Ok(())
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&self.transactions)?;
        self.storage.write(STORAGE_KEY, &json)
    }

    fn next_id(&self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Context, PaymentMethod};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn store_with_shared_storage() -> (TransactionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = TransactionStore::load(Box::new(storage.clone()));
        (store, storage)
    }

    fn persisted(storage: &MemoryStorage) -> Option<Vec<Transaction>> {
        storage
            .read(STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn add_prepends_and_persists() {
        let (mut store, storage) = store_with_shared_storage();
        store
            .add(NewTransaction::income(Context::Home, date(1), 1000.0, PaymentMethod::Cash))
            .unwrap();
        let second = store
            .add(NewTransaction::expense(Context::Home, date(2), 300.0, "Groceries"))
            .unwrap()
            .id;
        assert_eq!(store.transactions()[0].id, second);
        assert_eq!(persisted(&storage).unwrap(), store.transactions());
    }

    #[test]
    fn ids_are_unique_across_adds() {
        let (mut store, _) = store_with_shared_storage();
        for day in 1..=20 {
            store
                .add(NewTransaction::expense(Context::School, date(day), 10.0, "Stationery"))
                .unwrap();
        }
        let ids: HashSet<_> = store.transactions().iter().map(|txn| txn.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let (mut store, storage) = store_with_shared_storage();
        store
            .add(NewTransaction::expense(Context::Home, date(3), 50.0, "Water"))
            .unwrap();
        let before = store.transactions().to_vec();
        let removed = store.remove(Uuid::new_v4()).expect("no error for unknown id");
        assert!(removed.is_none());
        assert_eq!(store.transactions(), before.as_slice());
        assert_eq!(persisted(&storage).unwrap(), before);
    }

    #[test]
    fn remove_existing_id_updates_slot() {
        let (mut store, storage) = store_with_shared_storage();
        let id = store
            .add(NewTransaction::expense(Context::Home, date(3), 50.0, "Water"))
            .unwrap()
            .id;
        let removed = store.remove(id).unwrap().expect("removed entry");
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert_eq!(persisted(&storage).unwrap(), Vec::<Transaction>::new());
    }

    #[test]
    fn clear_deletes_slot_and_reload_is_empty() {
        let (mut store, storage) = store_with_shared_storage();
        store
            .add(NewTransaction::income(Context::School, date(4), 20.0, PaymentMethod::Bank))
            .unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(!storage.contains(STORAGE_KEY));

        let reloaded = TransactionStore::load(Box::new(storage.clone()));
        assert!(reloaded.is_empty());
    }

    struct StickySlot(MemoryStorage);

    impl StorageBackend for StickySlot {
        fn read(&self, key: &str) -> crate::storage::Result<Option<String>> {
            self.0.read(key)
        }

        fn write(&self, key: &str, value: &str) -> crate::storage::Result<()> {
            self.0.write(key, value)
        }

        fn remove(&self, _key: &str) -> crate::storage::Result<()> {
            Err(LedgerError::Storage("slot is read-only".into()))
        }
    }

    #[test]
    fn failed_clear_keeps_list_and_slot_in_sync() {
        let storage = Arc::new(StickySlot(MemoryStorage::new()));
        let mut store = TransactionStore::load(Box::new(storage.clone()));
        store
            .add(NewTransaction::expense(Context::Home, date(7), 40.0, "Water"))
            .unwrap();

        assert!(store.clear().is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(persisted(&storage.0).unwrap(), store.transactions());
    }

    #[test]
    fn malformed_slot_loads_as_empty() {
        let storage = MemoryStorage::with_slot(STORAGE_KEY, "{not json");
        let store = TransactionStore::load(Box::new(storage));
        assert!(store.is_empty());
    }

    #[test]
    fn reload_restores_persisted_list() {
        let (mut store, storage) = store_with_shared_storage();
        store
            .add(NewTransaction::income(Context::Home, date(5), 700.0, PaymentMethod::Other))
            .unwrap();
        store
            .add(
                NewTransaction::expense(Context::School, date(6), 120.0, "Field Trips")
                    .with_description("Zoo visit"),
            )
            .unwrap();
        let reloaded = TransactionStore::load(Box::new(storage.clone()));
        assert_eq!(reloaded.transactions(), store.transactions());
    }
}
