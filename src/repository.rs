use crate::{
    error::StorageError,
    model::Transaction,
    storage::{KeyValueStore, CORRUPT_TRANSACTIONS_KEY, TRANSACTIONS_KEY},
};

/// The in-memory list of transactions, mirrored to the store after every
/// mutation. The in-memory list stays authoritative if a write fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionRepository {
    transactions: Vec<Transaction>,
}

impl TransactionRepository {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Read the stored transaction list. A missing key is an empty list.
    ///
    /// Only text that is not a JSON array is `Corrupt`. Records that do not
    /// fit [Transaction] are skipped, and the raw text is copied to
    /// `transactions.corrupt` before the next write can drop them for good.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        let Some(raw) = store.get(TRANSACTIONS_KEY)? else {
            return Ok(Self::default());
        };

        let records = serde_json::from_str::<Vec<serde_json::Value>>(&raw).map_err(|err| {
            StorageError::Corrupt {
                key: TRANSACTIONS_KEY.to_string(),
                reason: err.to_string(),
            }
        })?;

        let total = records.len();
        let transactions: Vec<Transaction> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(transaction) => Some(transaction),
                Err(err) => {
                    tracing::warn!(index, "Skipping unreadable stored transaction: {err}");
                    None
                }
            })
            .collect();

        if transactions.len() < total {
            tracing::warn!(
                skipped = total - transactions.len(),
                "Some stored transactions could not be read"
            );
            if let Err(err) = store.set(CORRUPT_TRANSACTIONS_KEY, &raw) {
                tracing::error!("Could not back up unreadable transactions: {err}");
            }
        }

        Ok(Self::new(transactions))
    }

    /// Like [TransactionRepository::load] but never fails: unreadable data is
    /// copied aside to `transactions.corrupt` and the app starts empty.
    pub fn load_or_default(store: &dyn KeyValueStore) -> Self {
        match Self::load(store) {
            Ok(repository) => repository,
            Err(StorageError::Corrupt { key, reason }) => {
                tracing::error!("Stored transactions are unreadable ({reason}), starting empty");
                match store.get(&key) {
                    Ok(Some(raw)) => {
                        if let Err(err) = store.set(CORRUPT_TRANSACTIONS_KEY, &raw) {
                            tracing::error!("Could not back up unreadable transactions: {err}");
                        }
                    }
                    Ok(None) => {}
                    Err(err) => tracing::error!("{err}"),
                }
                Self::default()
            }
            Err(err) => {
                tracing::error!("Could not load transactions: {err}");
                Self::default()
            }
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// An id for a transaction created at `now_ms` that no stored transaction
    /// already uses, even when several are created within one millisecond.
    pub fn next_id(&self, now_ms: i64) -> i64 {
        let largest = self.transactions.iter().map(|t| t.id).max();
        match largest {
            Some(largest) if largest >= now_ms => largest + 1,
            _ => now_ms,
        }
    }

    pub fn add(
        &mut self,
        transaction: Transaction,
        store: &dyn KeyValueStore,
    ) -> Result<(), StorageError> {
        self.transactions.push(transaction);
        self.persist(store)
    }

    /// Remove the transaction with `id`. Returns `false` without touching the
    /// store when there is no such transaction.
    pub fn remove(&mut self, id: i64, store: &dyn KeyValueStore) -> Result<bool, StorageError> {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        self.transactions.remove(index);
        self.persist(store)?;
        Ok(true)
    }

    pub fn clear(&mut self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        self.transactions.clear();
        self.persist(store)
    }

    fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(&self.transactions).map_err(|err| StorageError::Serialize {
                key: TRANSACTIONS_KEY.to_string(),
                reason: err.to_string(),
            })?;
        store.set(TRANSACTIONS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        error::StorageError,
        model::{Transaction, TransactionType},
        storage::{KeyValueStore, MemoryStore, CORRUPT_TRANSACTIONS_KEY, TRANSACTIONS_KEY},
    };

    use super::TransactionRepository;

    fn transaction(id: i64, amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id,
            amount,
            kind,
            category: "General".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
        }
    }

    #[test]
    fn load_with_nothing_stored_is_empty() {
        let store = MemoryStore::new();

        let repository = TransactionRepository::load(&store).unwrap();

        assert!(repository.is_empty());
    }

    #[test]
    fn mutations_are_written_through_to_the_store() {
        let store = MemoryStore::new();
        let mut repository = TransactionRepository::default();

        repository
            .add(transaction(1, 10.0, TransactionType::Income), &store)
            .unwrap();
        repository
            .add(transaction(2, 4.0, TransactionType::Expense), &store)
            .unwrap();

        let reloaded = TransactionRepository::load(&store).unwrap();
        assert_eq!(reloaded, repository);

        repository.clear(&store).unwrap();
        assert_eq!(store.get(TRANSACTIONS_KEY), Ok(Some("[]".to_string())));
    }

    #[test]
    fn add_then_remove_restores_previous_content() {
        let store = MemoryStore::new();
        let mut repository = TransactionRepository::default();
        repository
            .add(transaction(1, 10.0, TransactionType::Income), &store)
            .unwrap();
        let before = repository.clone();

        repository
            .add(transaction(2, 3.0, TransactionType::Expense), &store)
            .unwrap();
        let removed = repository.remove(2, &store).unwrap();

        assert!(removed);
        assert_eq!(repository, before);
        assert_eq!(TransactionRepository::load(&store).unwrap(), before);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        let mut repository = TransactionRepository::default();
        repository
            .add(transaction(1, 10.0, TransactionType::Income), &store)
            .unwrap();

        let removed = repository.remove(99, &store).unwrap();

        assert!(!removed);
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn corrupt_data_is_reported_and_backed_up() {
        let store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, "{not json").unwrap();

        assert!(matches!(
            TransactionRepository::load(&store),
            Err(StorageError::Corrupt { .. })
        ));

        let repository = TransactionRepository::load_or_default(&store);

        assert!(repository.is_empty());
        assert_eq!(
            store.get(CORRUPT_TRANSACTIONS_KEY),
            Ok(Some("{not json".to_string()))
        );
    }

    #[test]
    fn one_blank_date_keeps_the_rest_of_the_history() {
        let store = MemoryStore::new();
        let raw = r#"[
            {"id": 1, "amount": 10, "type": "income", "category": "Salary", "date": "2024-01-01"},
            {"id": 2, "amount": 4, "type": "expense", "category": "Food", "date": ""}
        ]"#;
        store.set(TRANSACTIONS_KEY, raw).unwrap();

        let repository = TransactionRepository::load_or_default(&store);

        assert_eq!(repository.len(), 2);
        assert_eq!(
            repository.transactions()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(repository.transactions()[1].date, None);
        assert_eq!(store.get(CORRUPT_TRANSACTIONS_KEY), Ok(None));
    }

    #[test]
    fn unreadable_records_are_skipped_and_backed_up() {
        let store = MemoryStore::new();
        let raw = r#"[
            {"id": 1, "amount": 10, "type": "income", "category": "Salary", "date": "2024-01-01"},
            {"id": 2, "amount": 4, "type": "refund", "category": "Food", "date": "2024-01-02"},
            "stray"
        ]"#;
        store.set(TRANSACTIONS_KEY, raw).unwrap();

        let repository = TransactionRepository::load(&store).unwrap();

        let ids: Vec<i64> = repository.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(
            store.get(CORRUPT_TRANSACTIONS_KEY),
            Ok(Some(raw.to_string()))
        );
    }

    #[test]
    fn next_id_never_reuses_an_existing_id() {
        let repository = TransactionRepository::new(vec![
            transaction(1_000, 1.0, TransactionType::Income),
            transaction(1_001, 1.0, TransactionType::Income),
        ]);

        assert_eq!(repository.next_id(5_000), 5_000);
        assert_eq!(repository.next_id(1_001), 1_002);
        assert_eq!(repository.next_id(900), 1_002);
        assert_eq!(TransactionRepository::default().next_id(42), 42);
    }
}
