//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! client. It owns the [`RecordStore`] and the data directory (for
//! configuration), dispatches to `commands/*.rs`, and returns
//! [`CmdResult`]s. No printing, no business logic.
//!
//! `FitApi<B: KvBackend>` is generic over the storage backend:
//! - Production: `FitApi<FsBackend>`
//! - Testing: `FitApi<MemBackend>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::DayOfWeek;
use crate::store::{KvBackend, RecordStore};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::diet::MealInput;
pub use crate::commands::profile::ProfileUpdate;
pub use crate::commands::progress::ProgressInput;
pub use crate::commands::workouts::ExerciseInput;
pub use crate::commands::{CmdMessage, MessageLevel};

pub struct FitApi<B: KvBackend> {
    store: RecordStore<B>,
    data_dir: PathBuf,
}

impl<B: KvBackend> FitApi<B> {
    pub fn new(store: RecordStore<B>, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Workouts ---

    pub fn create_plan(
        &mut self,
        user: &str,
        name: &str,
        description: Option<String>,
        day: DayOfWeek,
    ) -> Result<CmdResult> {
        commands::workouts::create(&mut self.store, user, name, description, day)
    }

    pub fn add_exercise(
        &mut self,
        user: &str,
        plan_id: &str,
        input: ExerciseInput,
    ) -> Result<CmdResult> {
        commands::workouts::add_exercise(&mut self.store, user, plan_id, input)
    }

    pub fn remove_exercise(
        &mut self,
        user: &str,
        plan_id: &str,
        exercise_id: &str,
    ) -> Result<CmdResult> {
        commands::workouts::remove_exercise(&mut self.store, user, plan_id, exercise_id)
    }

    pub fn list_plans(&self, user: &str, day: Option<DayOfWeek>) -> Result<CmdResult> {
        commands::workouts::list(&self.store, user, day)
    }

    pub fn delete_plan(&mut self, user: &str, plan_id: &str) -> Result<CmdResult> {
        commands::workouts::delete(&mut self.store, user, plan_id)
    }

    // --- Diet ---

    pub fn log_meal(&mut self, user: &str, input: MealInput) -> Result<CmdResult> {
        commands::diet::log(&mut self.store, user, input)
    }

    pub fn list_meals(&self, user: &str, meal_filter: &str) -> Result<CmdResult> {
        commands::diet::list(&self.store, user, meal_filter)
    }

    pub fn delete_meal(&mut self, user: &str, log_id: &str) -> Result<CmdResult> {
        commands::diet::delete(&mut self.store, user, log_id)
    }

    // --- Progress ---

    pub fn log_progress(&mut self, user: &str, input: ProgressInput) -> Result<CmdResult> {
        commands::progress::log(&mut self.store, user, input)
    }

    pub fn list_progress(&self, user: &str) -> Result<CmdResult> {
        commands::progress::list(&self.store, user)
    }

    pub fn delete_progress(&mut self, user: &str, log_id: &str) -> Result<CmdResult> {
        commands::progress::delete(&mut self.store, user, log_id)
    }

    // --- Todos ---

    pub fn add_todo(
        &mut self,
        user: &str,
        title: &str,
        due: Option<NaiveDate>,
    ) -> Result<CmdResult> {
        commands::todos::add(&mut self.store, user, title, due)
    }

    pub fn toggle_todo(&mut self, user: &str, todo_id: &str) -> Result<CmdResult> {
        commands::todos::toggle(&mut self.store, user, todo_id)
    }

    pub fn list_todos(&self, user: &str) -> Result<CmdResult> {
        commands::todos::list(&self.store, user)
    }

    pub fn delete_todo(&mut self, user: &str, todo_id: &str) -> Result<CmdResult> {
        commands::todos::delete(&mut self.store, user, todo_id)
    }

    // --- Profile ---

    pub fn show_profile(&self, user: &str) -> Result<CmdResult> {
        commands::profile::show(&self.store, user)
    }

    pub fn update_profile(&mut self, user: &str, update: ProfileUpdate) -> Result<CmdResult> {
        commands::profile::update(&mut self.store, user, update)
    }

    // --- Overview & maintenance ---

    pub fn dashboard(&self, user: &str) -> Result<CmdResult> {
        commands::dashboard::run(&self.store, user, Local::now().date_naive(), &Local)
    }

    pub fn doctor(&self) -> Result<CmdResult> {
        commands::doctor::run(&self.store)
    }

    pub fn clear(&mut self) -> Result<CmdResult> {
        commands::clear::run(&mut self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}
