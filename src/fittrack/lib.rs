//! # fittrack Architecture
//!
//! fittrack is a **local-first fitness log**. Workout plans, meals, progress
//! measurements, todos and a profile are kept per user in a plain key-value
//! store: one JSON array per record kind under a fixed key. There is no
//! server; whoever holds the storage holds the data.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, picks the user, prints results         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, generic over the storage backend            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, exercise ordering, nutrition totals, ...     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: owner-scoped collections, upsert / append   │
//! │  - KvBackend: FsBackend (production), MemBackend (testing)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Operations on top of the store
//! - [`store`]: Key-value backends and typed record collections
//! - [`model`]: Record types (`WorkoutPlan`, `DietLog`, `ProgressLog`, `Todo`, `UserProfile`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
