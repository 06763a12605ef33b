//! String key-value persistence.
//!
//! The app mirrors its state into `window.localStorage`. Everything above this
//! module talks to the [KeyValueStore] trait so the repository and settings can
//! be exercised against [MemoryStore] outside a browser.

use std::{cell::RefCell, collections::HashMap};

use crate::error::StorageError;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const CORRUPT_TRANSACTIONS_KEY: &str = "transactions.corrupt";
pub const CURRENCY_KEY: &str = "currency";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const MONTHLY_BUDGET_KEY: &str = "monthlyBudget";
pub const INCOME_GOAL_KEY: &str = "incomeGoal";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            _ => Err(StorageError::Unavailable),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|err| StorageError::Read {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

/// Process-local store used in tests and as a fallback when the browser
/// refuses access to local storage (e.g. some private browsing modes).
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
