use super::backend::KvBackend;
use super::collection::{self, CollectionHealth, CollectionState, Record};
use super::keys;
use crate::error::Result;
use crate::model::{Account, DietLog, ProgressLog, Todo, UserProfile, WorkoutPlan};

/// Typed record persistence over a [`KvBackend`].
///
/// Every write is a full read-modify-write of one collection followed by a
/// single `set`, so a failed write leaves the previous collection untouched.
pub struct RecordStore<B: KvBackend> {
    backend: B,
    pretty: bool,
}

impl<B: KvBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            pretty: false,
        }
    }

    /// Write collections as indented JSON instead of a single line.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load a whole collection.
    /// Absent or unparseable data is an empty collection; only a failing
    /// backend is reported as an error.
    fn load<R: Record>(&self) -> Result<Vec<R>> {
        let Some(raw) = self.backend.get(R::KEY)? else {
            return Ok(Vec::new());
        };
        match collection::decode::<R>(&raw) {
            Ok(records) => {
                tracing::debug!(key = R::KEY, entries = records.len(), "Loaded collection");
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(
                    key = R::KEY,
                    error = %e,
                    "Stored collection is corrupt, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist<R: Record>(&self, records: &[R]) -> Result<()> {
        let raw = collection::encode(records, self.pretty)?;
        self.backend.set(R::KEY, &raw)?;
        tracing::debug!(key = R::KEY, entries = records.len(), "Saved collection");
        Ok(())
    }

    /// Records owned by `owner_id`, in stored order. Never fails.
    pub fn list<R: Record>(&self, owner_id: &str) -> Vec<R> {
        match self.load::<R>() {
            Ok(records) => collection::owned_by(records, owner_id),
            Err(e) => {
                tracing::warn!(key = R::KEY, error = %e, "Could not read collection");
                Vec::new()
            }
        }
    }

    /// Look up one record by id within the owner's scope.
    pub fn find<R: Record>(&self, owner_id: &str, id: &str) -> Option<R> {
        self.list::<R>(owner_id).into_iter().find(|r| r.id() == id)
    }

    pub fn save<R: Record>(&mut self, record: &R) -> Result<()> {
        let mut records = self.load::<R>()?;
        collection::write(&mut records, record.clone());
        self.persist(&records)
    }

    /// Remove every record of kind `R` with this id. Absent ids are a no-op
    /// and do not touch storage.
    pub fn delete<R: Record>(&mut self, id: &str) -> Result<()> {
        let mut records = self.load::<R>()?;
        if collection::remove(&mut records, id) == 0 {
            tracing::debug!(key = R::KEY, id, "Nothing to delete");
            return Ok(());
        }
        self.persist(&records)
    }

    pub fn get_profile(&self, owner_id: &str) -> Option<UserProfile> {
        self.find::<Account>(owner_id, owner_id)
            .and_then(|account| account.profile)
    }

    /// Replace the profile embedded in the owner's account container, creating
    /// the container with an empty email when there is none.
    pub fn save_profile(&mut self, owner_id: &str, profile: UserProfile) -> Result<()> {
        let mut accounts = self.load::<Account>()?;
        match accounts.iter_mut().find(|a| a.id == owner_id) {
            Some(account) => account.profile = Some(profile),
            None => accounts.push(Account {
                id: owner_id.to_string(),
                email: String::new(),
                profile: Some(profile),
            }),
        }
        self.persist(&accounts)
    }

    /// Remove every collection this store owns.
    pub fn clear(&mut self) -> Result<()> {
        for key in keys::ALL {
            self.backend.remove(key)?;
        }
        tracing::debug!("Cleared all collections");
        Ok(())
    }

    /// Report the state of every collection without modifying anything.
    pub fn inspect(&self) -> Vec<CollectionHealth> {
        vec![
            self.health::<WorkoutPlan>(),
            self.health::<DietLog>(),
            self.health::<ProgressLog>(),
            self.health::<Todo>(),
            self.health::<Account>(),
        ]
    }

    fn health<R: Record>(&self) -> CollectionHealth {
        let state = match self.backend.get(R::KEY) {
            Err(e) => CollectionState::Unreadable {
                reason: e.to_string(),
            },
            Ok(None) => CollectionState::Absent,
            Ok(Some(raw)) => match collection::decode::<R>(&raw) {
                Ok(records) => CollectionState::Valid {
                    entries: records.len(),
                },
                Err(e) => CollectionState::Corrupt {
                    reason: e.to_string(),
                },
            },
        };
        CollectionHealth {
            kind: R::KIND,
            key: R::KEY,
            state,
        }
    }
}
