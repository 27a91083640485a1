//! # Command Layer
//!
//! The operations a client performs on top of the record store: building a
//! workout plan exercise by exercise, logging meals and summing their macros,
//! ticking off todos, and so on. Each command is a plain function over a
//! [`RecordStore`](crate::store::RecordStore) that returns a [`CmdResult`].
//!
//! Commands never print, prompt or exit. Deleting or toggling something that
//! is not there is reported as a warning message. Modifying a record that
//! does not exist (adding an exercise to an unknown plan) is `NotFound`.
//! Invalid input and failed writes are errors.

use crate::config::FitConfig;
use crate::model::{DietLog, ProgressLog, Todo, UserProfile, WorkoutPlan};
use crate::store::CollectionHealth;

pub mod clear;
pub mod config;
pub mod dashboard;
pub mod diet;
pub mod doctor;
pub mod helpers;
pub mod profile;
pub mod progress;
pub mod todos;
pub mod workouts;

pub use dashboard::DashboardSummary;
pub use diet::NutritionTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub plans: Vec<WorkoutPlan>,
    pub diet_logs: Vec<DietLog>,
    pub progress_logs: Vec<ProgressLog>,
    pub todos: Vec<Todo>,
    pub profile: Option<UserProfile>,
    pub nutrition: Option<NutritionTotals>,
    pub dashboard: Option<DashboardSummary>,
    pub health: Vec<CollectionHealth>,
    pub config: Option<FitConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_plans(mut self, plans: Vec<WorkoutPlan>) -> Self {
        self.plans = plans;
        self
    }

    pub fn with_diet_logs(mut self, logs: Vec<DietLog>) -> Self {
        self.diet_logs = logs;
        self
    }

    pub fn with_progress_logs(mut self, logs: Vec<ProgressLog>) -> Self {
        self.progress_logs = logs;
        self
    }

    pub fn with_todos(mut self, todos: Vec<Todo>) -> Self {
        self.todos = todos;
        self
    }

    pub fn with_profile(mut self, profile: Option<UserProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_nutrition(mut self, totals: NutritionTotals) -> Self {
        self.nutrition = Some(totals);
        self
    }

    pub fn with_dashboard(mut self, summary: DashboardSummary) -> Self {
        self.dashboard = Some(summary);
        self
    }

    pub fn with_health(mut self, health: Vec<CollectionHealth>) -> Self {
        self.health = health;
        self
    }

    pub fn with_config(mut self, config: FitConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
