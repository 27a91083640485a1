//! # Storage Layer
//!
//! fittrack keeps every record kind as one JSON array under a fixed key in a
//! key-value store. The layer is split in two:
//!
//! - [`backend::KvBackend`]: raw `get`/`set`/`remove` of strings by key.
//!   This is the only part that knows about the medium.
//! - [`record_store::RecordStore`]: typed collections on top of a backend.
//!   Scopes reads by owner and applies the kind's [`collection::WritePolicy`].
//!
//! ## Write Policies
//!
//! - **Upsert** (`WorkoutPlan`, `Todo`, profile containers): a record whose id
//!   is already stored replaces that entry at the same position; otherwise it
//!   is appended.
//! - **Append** (`DietLog`, `ProgressLog`): always appended. Entries are only
//!   ever removed wholesale by id.
//!
//! ## Failure Model
//!
//! - Missing or unparseable collections read as empty. A single bad entry
//!   makes the whole collection unreadable; there is no per-entry recovery.
//! - Every write is read-modify-write of the entire collection followed by one
//!   atomic `set`. If the backend rejects the write (quota, I/O) the call fails
//!   and the previous value stays in place.
//! - Read-modify-write is not coordinated between processes. Two writers
//!   racing on the same key can lose an update.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, atomic
//!   tmp-file + rename writes.
//! - [`mem_backend::MemBackend`]: in-memory, with optional byte quota.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json
//! ├── fitness_tracker_workout_plans.json
//! ├── fitness_tracker_diet_logs.json
//! ├── fitness_tracker_progress_logs.json
//! ├── fitness_tracker_todos.json
//! └── fitness_tracker_user_profiles.json
//! ```

pub mod backend;
pub mod collection;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::KvBackend;
pub use collection::{CollectionHealth, CollectionState, Record, WritePolicy};
pub use record_store::RecordStore;

/// Fixed collection keys.
pub mod keys {
    pub const WORKOUT_PLANS: &str = "fitness_tracker_workout_plans";
    pub const DIET_LOGS: &str = "fitness_tracker_diet_logs";
    pub const PROGRESS_LOGS: &str = "fitness_tracker_progress_logs";
    pub const TODOS: &str = "fitness_tracker_todos";
    pub const USER_PROFILES: &str = "fitness_tracker_user_profiles";

    pub const ALL: [&str; 5] = [
        WORKOUT_PLANS,
        DIET_LOGS,
        PROGRESS_LOGS,
        TODOS,
        USER_PROFILES,
    ];
}
