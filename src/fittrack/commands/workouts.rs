use crate::commands::helpers::{finite, required, resolve, short_id};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FitError, Result};
use crate::model::{DayOfWeek, WorkoutPlan};
use crate::store::{KvBackend, RecordStore};

#[derive(Debug, Clone, Default)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

pub fn create<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    name: &str,
    description: Option<String>,
    day: DayOfWeek,
) -> Result<CmdResult> {
    let mut plan = WorkoutPlan::new(user, required("Plan name", name)?, day);
    plan.description = description.filter(|d| !d.trim().is_empty());
    store.save(&plan)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Plan created ({}): {} on {}",
        short_id(&plan.id),
        plan.name,
        plan.day_of_week
    )));
    Ok(result.with_plans(vec![plan]))
}

fn load_plan<B: KvBackend>(
    store: &RecordStore<B>,
    user: &str,
    plan_id: &str,
) -> Result<WorkoutPlan> {
    resolve::<B, WorkoutPlan>(store, user, plan_id)?.ok_or_else(|| FitError::NotFound {
        kind: "Workout plan",
        id: plan_id.to_string(),
    })
}

pub fn add_exercise<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    plan_id: &str,
    input: ExerciseInput,
) -> Result<CmdResult> {
    let name = required("Exercise name", &input.name)?;
    let weight = finite("Weight", input.weight)?;
    let mut plan = load_plan(store, user, plan_id)?;

    let position = {
        let exercise = plan.add_exercise(name.clone());
        exercise.sets = input.sets.filter(|n| *n > 0);
        exercise.reps = input.reps.filter(|n| *n > 0);
        exercise.weight = weight.filter(|w| *w > 0.0);
        exercise.notes = input.notes.filter(|n| !n.trim().is_empty());
        exercise.order_position
    };
    let message = format!("Added {} to {} at position {}", name, plan.name, position);

    store.save(&plan)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(message));
    Ok(result.with_plans(vec![plan]))
}

/// Remove an exercise from a plan. Remaining exercises keep their positions.
pub fn remove_exercise<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    plan_id: &str,
    exercise_id: &str,
) -> Result<CmdResult> {
    let exercise_id = exercise_id.trim();
    if exercise_id.is_empty() {
        return Err(FitError::InvalidInput("Empty exercise id".to_string()));
    }
    let mut plan = load_plan(store, user, plan_id)?;
    let mut result = CmdResult::default();

    let candidates: Vec<String> = plan
        .exercises
        .iter()
        .filter(|e| e.id == exercise_id || e.id.starts_with(exercise_id))
        .map(|e| e.id.clone())
        .collect();
    let target = match candidates.as_slice() {
        [only] => only.clone(),
        [] => {
            result.add_message(CmdMessage::warning(format!(
                "No exercise {} in {}",
                exercise_id, plan.name
            )));
            return Ok(result.with_plans(vec![plan]));
        }
        _ => match candidates.iter().find(|id| id.as_str() == exercise_id) {
            Some(exact) => exact.clone(),
            None => {
                return Err(FitError::InvalidInput(format!(
                    "Ambiguous exercise id prefix: {}",
                    exercise_id
                )))
            }
        },
    };

    if let Some(removed) = plan.remove_exercise(&target) {
        store.save(&plan)?;
        result.add_message(CmdMessage::success(format!(
            "Removed {} from {}",
            removed.name, plan.name
        )));
    }
    Ok(result.with_plans(vec![plan]))
}

pub fn list<B: KvBackend>(
    store: &RecordStore<B>,
    user: &str,
    day: Option<DayOfWeek>,
) -> Result<CmdResult> {
    let plans: Vec<_> = store
        .list::<WorkoutPlan>(user)
        .into_iter()
        .filter(|p| day.is_none_or(|d| p.day_of_week == d))
        .collect();

    let mut result = CmdResult::default();
    if plans.is_empty() {
        let msg = match day {
            Some(d) => format!("No workout plans for {}", d),
            None => "No workout plans yet".to_string(),
        };
        result.add_message(CmdMessage::info(msg));
    }
    Ok(result.with_plans(plans))
}

pub fn delete<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    plan_id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match resolve::<B, WorkoutPlan>(store, user, plan_id)? {
        Some(plan) => {
            store.delete::<WorkoutPlan>(&plan.id)?;
            result.add_message(CmdMessage::success(format!("Plan deleted: {}", plan.name)));
            Ok(result.with_plans(vec![plan]))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("No workout plan {}", plan_id)));
            Ok(result)
        }
    }
}
