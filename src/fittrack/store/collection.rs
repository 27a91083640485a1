//! Generic collection logic shared by every record kind.
//!
//! A collection is an ordered `Vec` of records serialized as one JSON array
//! under a fixed key. The functions here are pure; [`super::record_store`]
//! does the reading and writing.

use super::keys;
use crate::error::Result;
use crate::model::{Account, DietLog, ProgressLog, Todo, WorkoutPlan};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// How `save` treats a record whose id is already in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Replace the existing entry in place, or append if there is none.
    Upsert,
    /// Always append, even when the id is already present.
    Append,
}

/// A record kind persisted as its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human readable kind name, used in logs and messages.
    const KIND: &'static str;
    /// Storage key holding the whole collection.
    const KEY: &'static str;
    const POLICY: WritePolicy;

    fn id(&self) -> &str;
    fn owner_id(&self) -> &str;
}

impl Record for WorkoutPlan {
    const KIND: &'static str = "workout plan";
    const KEY: &'static str = keys::WORKOUT_PLANS;
    const POLICY: WritePolicy = WritePolicy::Upsert;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Record for DietLog {
    const KIND: &'static str = "diet log";
    const KEY: &'static str = keys::DIET_LOGS;
    const POLICY: WritePolicy = WritePolicy::Append;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Record for ProgressLog {
    const KIND: &'static str = "progress log";
    const KEY: &'static str = keys::PROGRESS_LOGS;
    const POLICY: WritePolicy = WritePolicy::Append;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Record for Todo {
    const KIND: &'static str = "todo";
    const KEY: &'static str = keys::TODOS;
    const POLICY: WritePolicy = WritePolicy::Upsert;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

/// Profile containers are owned by the account they describe.
impl Record for Account {
    const KIND: &'static str = "profile";
    const KEY: &'static str = keys::USER_PROFILES;
    const POLICY: WritePolicy = WritePolicy::Upsert;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_id(&self) -> &str {
        &self.id
    }
}

pub fn decode<R: Record>(raw: &str) -> serde_json::Result<Vec<R>> {
    serde_json::from_str(raw)
}

pub fn encode<R: Record>(records: &[R], pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(text)
}

/// Apply `record` to `records` according to the kind's write policy.
pub fn write<R: Record>(records: &mut Vec<R>, record: R) {
    match R::POLICY {
        WritePolicy::Upsert => {
            match records.iter().position(|r| r.id() == record.id()) {
                Some(idx) => records[idx] = record,
                None => records.push(record),
            }
        }
        WritePolicy::Append => records.push(record),
    }
}

/// Remove every entry with the given id. Returns how many were removed.
pub fn remove<R: Record>(records: &mut Vec<R>, id: &str) -> usize {
    let before = records.len();
    records.retain(|r| r.id() != id);
    before - records.len()
}

pub fn owned_by<R: Record>(records: Vec<R>, owner_id: &str) -> Vec<R> {
    records
        .into_iter()
        .filter(|r| r.owner_id() == owner_id)
        .collect()
}

/// State of one stored collection, as seen by `RecordStore::inspect`.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionState {
    Absent,
    Valid { entries: usize },
    /// The stored text does not parse; reads treat it as empty.
    Corrupt { reason: String },
    /// The backend could not be read at all.
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionHealth {
    pub kind: &'static str,
    pub key: &'static str,
    pub state: CollectionState,
}
