use crate::commands::helpers::{finite, resolve};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FitError, Result};
use crate::model::ProgressLog;
use crate::store::{KvBackend, RecordStore};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ProgressInput {
    pub weight: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub measurements: BTreeMap<String, f64>,
    pub notes: Option<String>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl ProgressInput {
    fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.body_fat_percentage.is_none()
            && self.measurements.is_empty()
            && self.notes.as_deref().is_none_or(|n| n.trim().is_empty())
    }
}

/// Parse a `name=value` measurement such as `waist=84.5`.
pub fn parse_measurement(s: &str) -> Result<(String, f64)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| FitError::InvalidInput(format!("Expected name=value, got {}", s)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(FitError::InvalidInput(format!("Missing measurement name in {}", s)));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| FitError::InvalidInput(format!("Invalid measurement value in {}", s)))?;
    Ok((name.to_string(), value))
}

pub fn log<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    input: ProgressInput,
) -> Result<CmdResult> {
    if input.is_empty() {
        return Err(FitError::InvalidInput(
            "A progress entry needs a weight, body fat, measurement or note".to_string(),
        ));
    }
    finite("Weight", input.weight)?;
    for (name, value) in &input.measurements {
        finite(name, Some(*value))?;
    }
    if let Some(bf) = finite("Body fat", input.body_fat_percentage)? {
        if !(0.0..=100.0).contains(&bf) {
            return Err(FitError::InvalidInput(format!(
                "Body fat must be between 0 and 100, got {}",
                bf
            )));
        }
    }

    let mut entry = ProgressLog::new(user);
    entry.weight = input.weight;
    entry.body_fat_percentage = input.body_fat_percentage;
    if !input.measurements.is_empty() {
        entry.measurements = Some(input.measurements);
    }
    entry.notes = input.notes.filter(|n| !n.trim().is_empty());
    if let Some(at) = input.logged_at {
        entry.logged_at = at;
    }
    store.save(&entry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Progress logged"));
    Ok(result.with_progress_logs(vec![entry]))
}

pub fn list<B: KvBackend>(store: &RecordStore<B>, user: &str) -> Result<CmdResult> {
    let logs = store.list::<ProgressLog>(user);
    let mut result = CmdResult::default();
    if logs.is_empty() {
        result.add_message(CmdMessage::info("No progress logged"));
    }
    Ok(result.with_progress_logs(logs))
}

/// Most recent entry by `logged_at`, regardless of stored order.
pub fn latest<B: KvBackend>(store: &RecordStore<B>, user: &str) -> Option<ProgressLog> {
    store
        .list::<ProgressLog>(user)
        .into_iter()
        .max_by_key(|log| log.logged_at)
}

pub fn delete<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    log_id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match resolve::<B, ProgressLog>(store, user, log_id)? {
        Some(entry) => {
            store.delete::<ProgressLog>(&entry.id)?;
            result.add_message(CmdMessage::success(format!(
                "Progress entry from {} deleted",
                entry.logged_at.format("%Y-%m-%d")
            )));
            Ok(result.with_progress_logs(vec![entry]))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("No progress entry {}", log_id)));
            Ok(result)
        }
    }
}
