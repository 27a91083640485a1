use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fittrack::model::DayOfWeek;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fittrack", version)]
#[command(
    about = "Local-first fitness log: workouts, meals, progress and todos",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// User to act as (defaults to the configured default-user)
    #[arg(short, long, global = true, env = "FITTRACK_USER")]
    pub user: Option<String>,

    /// Directory holding the data files
    #[arg(long, global = true, env = "FITTRACK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage workout plans
    #[command(alias = "w")]
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },

    /// Log and review meals
    #[command(alias = "d")]
    Diet {
        #[command(subcommand)]
        action: DietAction,
    },

    /// Track body weight and measurements
    #[command(alias = "p")]
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// Manage todos
    #[command(alias = "t")]
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Overview of today
    Dashboard,

    /// Check stored collections for corruption
    Doctor,

    /// Get or set configuration
    Config {
        /// Configuration key (default-user, pretty-json)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Delete all stored data for every user
    Clear {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkoutAction {
    /// Create a workout plan
    #[command(alias = "n")]
    New {
        name: String,

        /// Day of the week (defaults to today)
        #[arg(short, long)]
        day: Option<DayOfWeek>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Add an exercise to a plan
    AddExercise {
        /// Plan id (or unique prefix)
        plan: String,

        name: String,

        #[arg(long)]
        sets: Option<u32>,

        #[arg(long)]
        reps: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove an exercise from a plan
    RemoveExercise {
        plan: String,
        exercise: String,
    },

    /// List plans
    #[command(alias = "ls")]
    List {
        /// Only plans for this day
        #[arg(short, long)]
        day: Option<DayOfWeek>,
    },

    /// Delete a plan
    #[command(alias = "rm")]
    Delete { plan: String },
}

#[derive(Subcommand, Debug)]
pub enum DietAction {
    /// Log a meal
    Log {
        food: String,

        #[arg(long)]
        calories: Option<f64>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Fats in grams
        #[arg(long)]
        fats: Option<f64>,

        /// breakfast, lunch, dinner, ...
        #[arg(short, long)]
        meal: Option<String>,
    },

    /// List meals with nutrition totals
    #[command(alias = "ls")]
    List {
        /// Meal type to show, or "all"
        #[arg(short, long, default_value = "all")]
        meal: String,
    },

    /// Delete a meal entry
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProgressAction {
    /// Record weight, body fat or measurements
    Log {
        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        body_fat: Option<f64>,

        /// Measurement as name=value, repeatable (e.g. -m waist=84)
        #[arg(short, long = "measure")]
        measurements: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List progress entries
    #[command(alias = "ls")]
    List,

    /// Delete a progress entry
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TodoAction {
    /// Add a todo
    Add {
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Toggle a todo between done and open
    Toggle { id: String },

    /// List todos
    #[command(alias = "ls")]
    List,

    /// Delete a todo
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show the profile
    Show,

    /// Update profile fields
    Set {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        goal: Option<String>,
    },
}
