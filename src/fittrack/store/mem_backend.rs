use super::backend::KvBackend;
use crate::error::{FitError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value backend.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// An optional byte quota mimics the size limit of browser local storage:
/// the sum of key and value lengths across all entries may not exceed it.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Bytes currently used, counted the same way the quota is.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FitError::Store("Simulated write error".to_string()));
        }

        if let Some(limit) = self.quota {
            let current = self
                .entries
                .borrow()
                .get(key)
                .map(|v| key.len() + v.len())
                .unwrap_or(0);
            let needed = self.used_bytes() - current + key.len() + value.len();
            if needed > limit {
                return Err(FitError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FitError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{DayOfWeek, DietLog, Todo, WorkoutPlan};
    use crate::store::record_store::RecordStore;

    pub struct StoreFixture {
        pub store: RecordStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::with_backend(MemBackend::new()),
            }
        }

        pub fn with_plan(mut self, user: &str, name: &str, day: DayOfWeek) -> Self {
            let plan = WorkoutPlan::new(user, name, day);
            self.store.save(&plan).unwrap();
            self
        }

        pub fn with_meal(mut self, user: &str, food: &str, meal: &str, calories: f64) -> Self {
            let mut log = DietLog::new(user, food);
            log.meal_type = Some(meal.to_string());
            log.calories = Some(calories);
            self.store.save(&log).unwrap();
            self
        }

        pub fn with_todo(mut self, user: &str, title: &str, completed: bool) -> Self {
            let mut todo = Todo::new(user, title);
            todo.completed = completed;
            self.store.save(&todo).unwrap();
            self
        }

        /// Store raw text under a key, bypassing serialization.
        pub fn with_raw(self, key: &str, raw: &str) -> Self {
            self.store.backend().set(key, raw).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("nope").unwrap(), None);
    }

    #[test]
    fn set_overwrites() {
        let backend = MemBackend::new();
        backend.set("k", "one").unwrap();
        backend.set("k", "two").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(backend.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn quota_counts_replacement_not_addition() {
        let backend = MemBackend::new().with_quota(10);
        backend.set("k", "12345678").unwrap();
        // Replacing the 9-byte entry with another 9-byte entry fits.
        backend.set("k", "abcdefgh").unwrap();
        assert_eq!(backend.used_bytes(), 9);
    }

    #[test]
    fn quota_rejects_and_keeps_old_value() {
        let backend = MemBackend::new().with_quota(10);
        backend.set("k", "short").unwrap();

        let err = backend.set("k", "much too long").unwrap_err();
        assert!(matches!(
            err,
            FitError::QuotaExceeded {
                needed: 14,
                limit: 10,
                ..
            }
        ));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.set("k", "v").is_err());
        assert!(backend.remove("k").is_err());
        backend.set_simulate_write_error(false);
        assert!(backend.set("k", "v").is_ok());
    }

    #[test]
    fn remove_absent_is_ok() {
        let backend = MemBackend::new();
        backend.remove("ghost").unwrap();
    }
}
