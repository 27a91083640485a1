use crate::commands::diet::NutritionTotals;
use crate::commands::{progress, CmdResult};
use crate::error::Result;
use crate::model::{DayOfWeek, DietLog, Todo, WorkoutPlan};
use crate::store::{KvBackend, RecordStore};
use chrono::{NaiveDate, TimeZone};

/// One-screen overview for a user on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub day: DayOfWeek,
    pub plans_total: usize,
    /// Names of the plans scheduled for `day`.
    pub plans_today: Vec<String>,
    pub meals_today: usize,
    pub nutrition_today: NutritionTotals,
    pub todos_completed: usize,
    pub todos_total: usize,
    pub latest_weight: Option<f64>,
}

/// Meals count toward `today` by their date in `tz`, not in UTC.
pub fn run<B: KvBackend, Tz: TimeZone>(
    store: &RecordStore<B>,
    user: &str,
    today: NaiveDate,
    tz: &Tz,
) -> Result<CmdResult> {
    let day = DayOfWeek::of(today);

    let plans = store.list::<WorkoutPlan>(user);
    let plans_today = plans
        .iter()
        .filter(|p| p.day_of_week == day)
        .map(|p| p.name.clone())
        .collect();

    let meals: Vec<_> = store
        .list::<DietLog>(user)
        .into_iter()
        .filter(|log| log.logged_at.with_timezone(tz).date_naive() == today)
        .collect();

    let todos = store.list::<Todo>(user);

    let summary = DashboardSummary {
        day,
        plans_total: plans.len(),
        plans_today,
        meals_today: meals.len(),
        nutrition_today: NutritionTotals::from_logs(&meals),
        todos_completed: todos.iter().filter(|t| t.completed).count(),
        todos_total: todos.len(),
        latest_weight: progress::latest(store, user).and_then(|p| p.weight),
    };

    Ok(CmdResult::default().with_dashboard(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProgressLog;
    use crate::store::mem_backend::fixtures::StoreFixture;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn summarizes_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 24).unwrap(); // Monday
        let mut store = StoreFixture::new()
            .with_plan("u1", "Push", DayOfWeek::Monday)
            .with_plan("u1", "Pull", DayOfWeek::Tuesday)
            .with_todo("u1", "Stretch", true)
            .with_todo("u1", "Walk", false)
            .store;

        let mut breakfast = DietLog::new("u1", "Oats");
        breakfast.calories = Some(300.0);
        breakfast.logged_at = Utc.with_ymd_and_hms(2025, 3, 24, 7, 0, 0).unwrap();
        let mut yesterday = DietLog::new("u1", "Cake");
        yesterday.calories = Some(500.0);
        yesterday.logged_at = Utc.with_ymd_and_hms(2025, 3, 23, 20, 0, 0).unwrap();
        store.save(&breakfast).unwrap();
        store.save(&yesterday).unwrap();

        let mut weigh_in = ProgressLog::new("u1");
        weigh_in.weight = Some(80.5);
        store.save(&weigh_in).unwrap();

        let summary = run(&store, "u1", today, &Utc).unwrap().dashboard.unwrap();
        assert_eq!(summary.day, DayOfWeek::Monday);
        assert_eq!(summary.plans_total, 2);
        assert_eq!(summary.plans_today, vec!["Push".to_string()]);
        assert_eq!(summary.meals_today, 1);
        assert_eq!(summary.nutrition_today.calories, 300.0);
        assert_eq!((summary.todos_completed, summary.todos_total), (1, 2));
        assert_eq!(summary.latest_weight, Some(80.5));
    }

    #[test]
    fn empty_store_summary() {
        let fixture = StoreFixture::new();
        let today = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let summary = run(&fixture.store, "u1", today, &Utc)
            .unwrap()
            .dashboard
            .unwrap();
        assert_eq!(summary.day, DayOfWeek::Sunday);
        assert_eq!(summary.plans_total, 0);
        assert_eq!(summary.latest_weight, None);
    }

    #[test]
    fn meals_are_bucketed_by_local_date() {
        // 20:30 in Los Angeles on the 24th is already the 25th in UTC
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let mut store = StoreFixture::new().store;
        let mut dinner = DietLog::new("u1", "Pasta");
        dinner.calories = Some(700.0);
        dinner.logged_at = Utc.with_ymd_and_hms(2025, 3, 25, 3, 30, 0).unwrap();
        store.save(&dinner).unwrap();

        let the_24th = NaiveDate::from_ymd_opt(2025, 3, 24).unwrap();
        let the_25th = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();

        let local = run(&store, "u1", the_24th, &pacific).unwrap().dashboard.unwrap();
        assert_eq!(local.meals_today, 1);
        assert_eq!(local.nutrition_today.calories, 700.0);

        let next_day = run(&store, "u1", the_25th, &pacific).unwrap().dashboard.unwrap();
        assert_eq!(next_day.meals_today, 0);
    }
}
