//! # Domain Records
//!
//! Every persisted record carries an opaque `id` (generated by the caller, see
//! [`new_id`]) and the `userId` of its owner. Field names on the wire are
//! camelCase so the stored collections stay readable by the web client that
//! shares the same storage layout.
//!
//! Optional fields are omitted when absent and accepted as either missing or
//! `null` when read back.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a fresh record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("Unknown day of week: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Length of the plan's exercise list when this entry was added.
    /// Never renumbered, so gaps are expected after removals.
    pub order_position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl WorkoutPlan {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, day: DayOfWeek) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            day_of_week: day,
            exercises: Vec::new(),
        }
    }

    /// Append an exercise, stamping its `order_position` with the current
    /// list length. Returns the new entry so callers can fill in the details.
    pub fn add_exercise(&mut self, name: impl Into<String>) -> &mut WorkoutExercise {
        let position = self.exercises.len();
        self.exercises.push(WorkoutExercise {
            id: new_id(),
            name: name.into(),
            sets: None,
            reps: None,
            weight: None,
            notes: None,
            order_position: position,
        });
        &mut self.exercises[position]
    }

    pub fn remove_exercise(&mut self, exercise_id: &str) -> Option<WorkoutExercise> {
        let pos = self.exercises.iter().position(|e| e.id == exercise_id)?;
        Some(self.exercises.remove(pos))
    }

    /// Exercises in display order. Ties keep their stored order.
    pub fn sorted_exercises(&self) -> Vec<&WorkoutExercise> {
        let mut exercises: Vec<_> = self.exercises.iter().collect();
        exercises.sort_by_key(|e| e.order_position);
        exercises
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietLog {
    pub id: String,
    pub user_id: String,
    pub food_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl DietLog {
    pub fn new(user_id: impl Into<String>, food_name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            food_name: food_name.into(),
            calories: None,
            protein: None,
            carbs: None,
            fats: None,
            meal_type: None,
            logged_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLog {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl ProgressLog {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            weight: None,
            body_fat_percentage: None,
            measurements: None,
            notes: None,
            logged_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Todo {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            title: title.into(),
            completed: false,
            due_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Account-shaped container the profile is embedded in. `id` is the owner id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_exercise_stamps_current_length() {
        let mut plan = WorkoutPlan::new("u1", "Push", DayOfWeek::Monday);
        plan.add_exercise("Bench");
        plan.add_exercise("Dips");
        let positions: Vec<_> = plan.exercises.iter().map(|e| e.order_position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn removal_leaves_gaps() {
        let mut plan = WorkoutPlan::new("u1", "Push", DayOfWeek::Monday);
        plan.add_exercise("Bench");
        let middle = plan.add_exercise("Incline").id.clone();
        plan.add_exercise("Dips");

        assert!(plan.remove_exercise(&middle).is_some());
        let positions: Vec<_> = plan.exercises.iter().map(|e| e.order_position).collect();
        assert_eq!(positions, vec![0, 2]);
        assert!(plan.remove_exercise(&middle).is_none());
    }

    #[test]
    fn sorted_exercises_orders_by_position() {
        let mut plan = WorkoutPlan::new("u1", "Legs", DayOfWeek::Friday);
        plan.add_exercise("Squat");
        plan.add_exercise("Lunge");
        plan.exercises.reverse();

        let names: Vec<_> = plan
            .sorted_exercises()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Squat", "Lunge"]);
    }

    #[test]
    fn optional_fields_are_omitted_on_write() {
        let todo = Todo::new("u1", "Stretch");
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("dueDate").is_none());
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn null_and_missing_optionals_both_read_as_none() {
        let with_null = r#"{"id":"t1","userId":"u1","title":"x","completed":false,"dueDate":null}"#;
        let missing = r#"{"id":"t1","userId":"u1","title":"x","completed":false}"#;
        let a: Todo = serde_json::from_str(with_null).unwrap();
        let b: Todo = serde_json::from_str(missing).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.due_date, None);
    }

    #[test]
    fn reads_browser_shaped_diet_log() {
        let raw = r#"{"id":"d1","userId":"u1","foodName":"Oats","calories":300,
            "protein":10.5,"carbs":54,"fats":5,"mealType":"breakfast",
            "loggedAt":"2025-03-25T07:30:00.000Z"}"#;
        let log: DietLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.calories, Some(300.0));
        assert_eq!(log.meal_type.as_deref(), Some("breakfast"));
        assert_eq!(log.logged_at.date_naive().to_string(), "2025-03-25");
    }

    #[test]
    fn day_of_week_parses_names_and_abbreviations() {
        assert_eq!("monday".parse::<DayOfWeek>(), Ok(DayOfWeek::Monday));
        assert_eq!("Thu".parse::<DayOfWeek>(), Ok(DayOfWeek::Thursday));
        assert!("Funday".parse::<DayOfWeek>().is_err());
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Sunday).unwrap(),
            "\"Sunday\""
        );
    }

    #[test]
    fn day_of_week_of_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
        assert_eq!(DayOfWeek::of(date), DayOfWeek::Tuesday);
    }
}
