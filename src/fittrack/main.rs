use chrono::{DateTime, Local, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use fittrack::api::{
    CmdMessage, ConfigAction, ExerciseInput, FitApi, MealInput, MessageLevel, ProfileUpdate,
    ProgressInput,
};
use fittrack::commands::{CmdResult, DashboardSummary, NutritionTotals};
use fittrack::config::{FitConfig, CONFIG_KEYS};
use fittrack::error::{FitError, Result};
use fittrack::model::{DayOfWeek, DietLog, ProgressLog, Todo, UserProfile, WorkoutPlan};
use fittrack::store::fs_backend::FsBackend;
use fittrack::store::{CollectionState, RecordStore};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{
    Cli, Commands, DietAction, ProfileAction, ProgressAction, TodoAction, WorkoutAction,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "fittrack=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: FitApi<FsBackend>,
    user: Option<String>,
}

impl AppContext {
    fn user(&self) -> Result<&str> {
        self.user.as_deref().ok_or_else(|| {
            FitError::Config(
                "No user selected: pass --user or run `fittrack config default-user <id>`"
                    .to_string(),
            )
        })
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Workout { action }) => handle_workout(&mut ctx, action),
        Some(Commands::Diet { action }) => handle_diet(&mut ctx, action),
        Some(Commands::Progress { action }) => handle_progress(&mut ctx, action),
        Some(Commands::Todo { action }) => handle_todo(&mut ctx, action),
        Some(Commands::Profile { action }) => handle_profile(&mut ctx, action),
        Some(Commands::Dashboard) | None => handle_dashboard(&ctx),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().ok_or_else(|| {
            FitError::Config("Could not determine a data directory, use --data-dir".into())
        })?,
    };

    let config = FitConfig::load(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "Using data directory");

    let store =
        RecordStore::with_backend(FsBackend::new(data_dir.clone())).pretty(config.pretty_json);
    let user = cli.user.clone().or(config.default_user);

    Ok(AppContext {
        api: FitApi::new(store, data_dir),
        user,
    })
}

fn handle_workout(ctx: &mut AppContext, action: WorkoutAction) -> Result<()> {
    let user = ctx.user()?.to_string();
    let result = match action {
        WorkoutAction::New {
            name,
            day,
            description,
        } => {
            let day = day.unwrap_or_else(|| DayOfWeek::of(Local::now().date_naive()));
            ctx.api.create_plan(&user, &name, description, day)?
        }
        WorkoutAction::AddExercise {
            plan,
            name,
            sets,
            reps,
            weight,
            notes,
        } => {
            let input = ExerciseInput {
                name,
                sets,
                reps,
                weight,
                notes,
            };
            ctx.api.add_exercise(&user, &plan, input)?
        }
        WorkoutAction::RemoveExercise { plan, exercise } => {
            ctx.api.remove_exercise(&user, &plan, &exercise)?
        }
        WorkoutAction::List { day } => {
            let result = ctx.api.list_plans(&user, day)?;
            print_plans(&result.plans);
            result
        }
        WorkoutAction::Delete { plan } => ctx.api.delete_plan(&user, &plan)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_diet(ctx: &mut AppContext, action: DietAction) -> Result<()> {
    let user = ctx.user()?.to_string();
    let result = match action {
        DietAction::Log {
            food,
            calories,
            protein,
            carbs,
            fats,
            meal,
        } => {
            let input = MealInput {
                food_name: food,
                calories,
                protein,
                carbs,
                fats,
                meal_type: meal,
                logged_at: None,
            };
            ctx.api.log_meal(&user, input)?
        }
        DietAction::List { meal } => {
            let result = ctx.api.list_meals(&user, &meal)?;
            print_meals(&result.diet_logs);
            if let Some(totals) = &result.nutrition {
                print_nutrition(totals);
            }
            result
        }
        DietAction::Delete { id } => ctx.api.delete_meal(&user, &id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_progress(ctx: &mut AppContext, action: ProgressAction) -> Result<()> {
    let user = ctx.user()?.to_string();
    let result = match action {
        ProgressAction::Log {
            weight,
            body_fat,
            measurements,
            notes,
        } => {
            let measurements = measurements
                .iter()
                .map(|m| fittrack::commands::progress::parse_measurement(m))
                .collect::<Result<BTreeMap<_, _>>>()?;
            let input = ProgressInput {
                weight,
                body_fat_percentage: body_fat,
                measurements,
                notes,
                logged_at: None,
            };
            ctx.api.log_progress(&user, input)?
        }
        ProgressAction::List => {
            let result = ctx.api.list_progress(&user)?;
            print_progress(&result.progress_logs);
            result
        }
        ProgressAction::Delete { id } => ctx.api.delete_progress(&user, &id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_todo(ctx: &mut AppContext, action: TodoAction) -> Result<()> {
    let user = ctx.user()?.to_string();
    let result = match action {
        TodoAction::Add { title, due } => ctx.api.add_todo(&user, &title, due)?,
        TodoAction::Toggle { id } => ctx.api.toggle_todo(&user, &id)?,
        TodoAction::List => {
            let result = ctx.api.list_todos(&user)?;
            print_todos(&result.todos);
            result
        }
        TodoAction::Delete { id } => ctx.api.delete_todo(&user, &id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_profile(ctx: &mut AppContext, action: Option<ProfileAction>) -> Result<()> {
    let user = ctx.user()?.to_string();
    let result = match action {
        None | Some(ProfileAction::Show) => ctx.api.show_profile(&user)?,
        Some(ProfileAction::Set {
            username,
            full_name,
            height,
            weight,
            goal,
        }) => {
            let update = ProfileUpdate {
                username,
                full_name,
                height,
                weight,
                goal,
            };
            ctx.api.update_profile(&user, update)?
        }
    };
    if let Some(profile) = &result.profile {
        print_profile(&user, profile);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_dashboard(ctx: &AppContext) -> Result<()> {
    let user = ctx.user()?;
    let result = ctx.api.dashboard(user)?;
    if let Some(summary) = &result.dashboard {
        print_dashboard(user, summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    for entry in &result.health {
        let state = match &entry.state {
            CollectionState::Absent => "absent".dimmed(),
            CollectionState::Valid { entries } => format!("{} entries", entries).green(),
            CollectionState::Corrupt { .. } => "corrupt".red(),
            CollectionState::Unreadable { .. } => "unreadable".red(),
        };
        println!("{:<14} {}", entry.kind, state);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        for key in CONFIG_KEYS {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        print_messages(&[CmdMessage::warning(format!(
            "This deletes every record in {}. Re-run with --yes to confirm.",
            ctx.api.data_dir().display()
        ))]);
        return Ok(());
    }
    let result: CmdResult = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const NAME_WIDTH: usize = 28;
const TIME_WIDTH: usize = 16;

fn short(id: &str) -> String {
    fittrack::commands::helpers::short_id(id).to_string()
}

fn print_plans(plans: &[WorkoutPlan]) {
    for day in DayOfWeek::ALL {
        let todays: Vec<_> = plans.iter().filter(|p| p.day_of_week == day).collect();
        if todays.is_empty() {
            continue;
        }
        println!("{}", day.to_string().bold());
        for plan in todays {
            println!("  {} {}", short(&plan.id).yellow(), plan.name);
            if let Some(description) = &plan.description {
                println!("           {}", description.dimmed());
            }
            for exercise in plan.sorted_exercises() {
                let mut detail = Vec::new();
                match (exercise.sets, exercise.reps) {
                    (Some(s), Some(r)) => detail.push(format!("{}x{}", s, r)),
                    (Some(s), None) => detail.push(format!("{} sets", s)),
                    (None, Some(r)) => detail.push(format!("{} reps", r)),
                    (None, None) => {}
                }
                if let Some(w) = exercise.weight {
                    detail.push(format!("{} kg", w));
                }
                println!(
                    "           {} {} {}",
                    short(&exercise.id).dimmed(),
                    exercise.name,
                    detail.join(", ").dimmed()
                );
            }
        }
    }
}

fn print_meals(logs: &[DietLog]) {
    for log in logs {
        let name = truncate_to_width(&log.food_name, NAME_WIDTH);
        let padding = NAME_WIDTH.saturating_sub(name.width());
        let calories = log
            .calories
            .map(|c| format!("{:.0} kcal", c))
            .unwrap_or_default();
        println!(
            "{} {}{} {:<10} {:>9} {}",
            short(&log.id).yellow(),
            name,
            " ".repeat(padding),
            log.meal_type.as_deref().unwrap_or("-"),
            calories,
            format_time_ago(log.logged_at).dimmed()
        );
    }
}

fn print_nutrition(totals: &NutritionTotals) {
    println!(
        "{} {:.0} kcal, protein {:.1} g, carbs {:.1} g, fats {:.1} g",
        "Total:".bold(),
        totals.calories,
        totals.protein,
        totals.carbs,
        totals.fats
    );
}

fn print_progress(logs: &[ProgressLog]) {
    for log in logs {
        let mut parts = Vec::new();
        if let Some(w) = log.weight {
            parts.push(format!("{} kg", w));
        }
        if let Some(bf) = log.body_fat_percentage {
            parts.push(format!("{}% body fat", bf));
        }
        if let Some(measurements) = &log.measurements {
            parts.extend(measurements.iter().map(|(k, v)| format!("{} {}", k, v)));
        }
        if let Some(notes) = &log.notes {
            parts.push(notes.clone());
        }
        println!(
            "{} {} {}",
            short(&log.id).yellow(),
            log.logged_at.with_timezone(&Local).format("%Y-%m-%d"),
            parts.join(", ")
        );
    }
}

fn print_todos(todos: &[Todo]) {
    for todo in todos {
        let mark = if todo.completed { "[x]".green() } else { "[ ]".normal() };
        let due = todo
            .due_date
            .map(|d| format!("due {}", d))
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            short(&todo.id).yellow(),
            mark,
            todo.title,
            due.dimmed()
        );
    }
}

fn print_profile(user: &str, profile: &UserProfile) {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "Not set".to_string());
    let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(|| "--".to_string());
    println!("{} {}", "Profile for".bold(), user);
    println!("  Username:  {}", text(&profile.username));
    println!("  Full name: {}", text(&profile.full_name));
    println!("  Height:    {} cm", number(profile.height));
    println!("  Weight:    {} kg", number(profile.weight));
    println!("  Goal:      {}", text(&profile.goal));
}

fn print_dashboard(user: &str, summary: &DashboardSummary) {
    println!("{} {} ({})", "Dashboard for".bold(), user, summary.day);
    if summary.plans_today.is_empty() {
        println!("  Workouts today: {}", "rest day".dimmed());
    } else {
        println!("  Workouts today: {}", summary.plans_today.join(", "));
    }
    println!("  Plans total:    {}", summary.plans_total);
    println!(
        "  Meals today:    {} ({:.0} kcal)",
        summary.meals_today, summary.nutrition_today.calories
    );
    println!(
        "  Todos:          {}/{} completed",
        summary.todos_completed, summary.todos_total
    );
    if let Some(weight) = summary.latest_weight {
        println!("  Latest weight:  {} kg", weight);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "fittrack", "fittrack").map(|dirs| dirs.data_dir().to_path_buf())
}
