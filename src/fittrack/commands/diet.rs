use crate::commands::helpers::{finite, required, resolve};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DietLog;
use crate::store::{KvBackend, RecordStore};
use chrono::{DateTime, Utc};

pub const DEFAULT_MEAL_TYPE: &str = "breakfast";
/// Filter value that matches every meal type.
pub const ALL_MEALS: &str = "all";

#[derive(Debug, Clone, Default)]
pub struct MealInput {
    pub food_name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub meal_type: Option<String>,
    /// Defaults to now.
    pub logged_at: Option<DateTime<Utc>>,
}

/// Summed macros over a set of diet logs. Missing values count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl NutritionTotals {
    pub fn from_logs<'a>(logs: impl IntoIterator<Item = &'a DietLog>) -> Self {
        logs.into_iter().fold(Self::default(), |acc, log| Self {
            calories: acc.calories + log.calories.unwrap_or(0.0),
            protein: acc.protein + log.protein.unwrap_or(0.0),
            carbs: acc.carbs + log.carbs.unwrap_or(0.0),
            fats: acc.fats + log.fats.unwrap_or(0.0),
        })
    }
}

pub fn log<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    input: MealInput,
) -> Result<CmdResult> {
    let mut entry = DietLog::new(user, required("Food name", &input.food_name)?);
    entry.calories = finite("Calories", input.calories)?;
    entry.protein = finite("Protein", input.protein)?;
    entry.carbs = finite("Carbs", input.carbs)?;
    entry.fats = finite("Fats", input.fats)?;
    entry.meal_type = Some(
        input
            .meal_type
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MEAL_TYPE.to_string()),
    );
    if let Some(at) = input.logged_at {
        entry.logged_at = at;
    }
    store.save(&entry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Logged {} for {}",
        entry.food_name,
        entry.meal_type.as_deref().unwrap_or(DEFAULT_MEAL_TYPE)
    )));
    Ok(result.with_diet_logs(vec![entry]))
}

/// Diet logs for one meal type (or [`ALL_MEALS`]) with their nutrition totals.
pub fn list<B: KvBackend>(
    store: &RecordStore<B>,
    user: &str,
    meal_filter: &str,
) -> Result<CmdResult> {
    let filter = meal_filter.trim().to_ascii_lowercase();
    let logs: Vec<_> = store
        .list::<DietLog>(user)
        .into_iter()
        .filter(|log| {
            filter.is_empty()
                || filter == ALL_MEALS
                || log.meal_type.as_deref() == Some(filter.as_str())
        })
        .collect();

    let totals = NutritionTotals::from_logs(&logs);
    let mut result = CmdResult::default();
    if logs.is_empty() {
        result.add_message(CmdMessage::info("No meals logged"));
    }
    Ok(result.with_diet_logs(logs).with_nutrition(totals))
}

pub fn delete<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    log_id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match resolve::<B, DietLog>(store, user, log_id)? {
        Some(entry) => {
            store.delete::<DietLog>(&entry.id)?;
            result.add_message(CmdMessage::success(format!("Meal deleted: {}", entry.food_name)));
            Ok(result.with_diet_logs(vec![entry]))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("No diet log {}", log_id)));
            Ok(result)
        }
    }
}
