use clap::{Args, Parser, Subcommand};
use fitlog_core::*;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal workout tracker with weekly goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record, inspect and delete workouts
    Workouts {
        #[command(subcommand)]
        command: WorkoutCommand,
    },

    /// Aggregate statistics over all workouts
    Stats,

    /// Schedule and list workout reminders
    Reminders {
        #[command(subcommand)]
        command: ReminderCommand,
    },

    /// Set or show the weekly goal
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Progress toward the weekly goal for the current week
    Progress,

    /// Export all workouts to a CSV file
    Export {
        /// Destination file
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// List workouts, newest first
    List {
        /// Maximum number of workouts to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record a workout
    Add(AddWorkoutArgs),

    /// Show a single workout
    Get { id: u64 },

    /// Delete a workout
    Delete { id: u64 },
}

#[derive(Args)]
struct AddWorkoutArgs {
    /// Full workout body as JSON (type, duration_minutes, exercises, notes, date)
    #[arg(long, conflicts_with_all = ["workout_type", "duration", "exercise", "notes", "date"])]
    json: Option<String>,

    /// Workout type label
    #[arg(long = "type")]
    workout_type: Option<String>,

    /// Duration in minutes
    #[arg(long, allow_negative_numbers = true)]
    duration: Option<i64>,

    /// Exercise name (repeatable)
    #[arg(long)]
    exercise: Vec<String>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,

    /// Workout date (defaults to now)
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum ReminderCommand {
    /// Schedule a reminder
    Add {
        /// When to remind
        #[arg(long)]
        date: Option<String>,

        /// Reminder text
        #[arg(long)]
        message: Option<String>,
    },

    /// List upcoming reminders, soonest first
    List,
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Replace the weekly goal
    Set {
        /// Full goal body as JSON (session_goal, calorie_goal)
        #[arg(long, conflicts_with_all = ["sessions", "calories"])]
        json: Option<String>,

        /// Sessions per week
        #[arg(long)]
        sessions: Option<i64>,

        /// Calories per week
        #[arg(long)]
        calories: Option<i64>,
    },

    /// Show the weekly goal
    Show,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    fitlog_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    tracing::debug!("Using data directory {:?}", config.data.data_dir);
    let mut tracker = Tracker::from_config(&config);

    match execute(&mut tracker, cli.command) {
        Ok(data) => {
            print_envelope(&json!({ "success": true, "data": data }))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_recoverable() => {
            print_envelope(&json!({ "success": false, "error": e.to_string() }))?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn execute(tracker: &mut Tracker<JsonFileGateway>, command: Commands) -> Result<Value> {
    match command {
        Commands::Workouts { command } => cmd_workouts(tracker, command),
        Commands::Stats => Ok(serde_json::to_value(tracker.stats()?)?),
        Commands::Reminders { command } => cmd_reminders(tracker, command),
        Commands::Goal { command } => cmd_goal(tracker, command),
        Commands::Progress => Ok(serde_json::to_value(tracker.progress()?)?),
        Commands::Export { output } => {
            let count = export_workouts(tracker.workouts(), &output)?;
            Ok(json!({ "exported": count, "path": output }))
        }
    }
}

fn cmd_workouts(tracker: &mut Tracker<JsonFileGateway>, command: WorkoutCommand) -> Result<Value> {
    match command {
        WorkoutCommand::List { limit } => Ok(serde_json::to_value(tracker.list_workouts(limit))?),
        WorkoutCommand::Add(args) => {
            let draft = match args.json {
                Some(body) => parse_body::<WorkoutDraft>(&body)?,
                None => WorkoutDraft {
                    workout_type: args.workout_type,
                    duration_minutes: args.duration,
                    exercises: Some(args.exercise.into_iter().map(Exercise::named).collect()),
                    notes: args.notes,
                    date: args.date,
                },
            };
            Ok(serde_json::to_value(tracker.add_workout(draft)?)?)
        }
        WorkoutCommand::Get { id } => Ok(serde_json::to_value(tracker.get_workout(id)?)?),
        WorkoutCommand::Delete { id } => {
            if !tracker.delete_workout(id)? {
                return Err(Error::NotFound { kind: "workout", id });
            }
            Ok(json!({ "id": id, "deleted": true }))
        }
    }
}

fn cmd_reminders(tracker: &mut Tracker<JsonFileGateway>, command: ReminderCommand) -> Result<Value> {
    match command {
        ReminderCommand::Add { date, message } => {
            let reminder = tracker.add_reminder(date.as_deref(), message)?;
            Ok(serde_json::to_value(reminder)?)
        }
        ReminderCommand::List => Ok(serde_json::to_value(tracker.upcoming_reminders()?)?),
    }
}

fn cmd_goal(tracker: &mut Tracker<JsonFileGateway>, command: GoalCommand) -> Result<Value> {
    match command {
        GoalCommand::Set {
            json,
            sessions,
            calories,
        } => {
            let draft = match json {
                Some(body) => parse_body::<GoalDraft>(&body)?,
                None => GoalDraft {
                    session_goal: sessions,
                    calorie_goal: calories,
                },
            };
            Ok(serde_json::to_value(tracker.set_goal(draft)?)?)
        }
        GoalCommand::Show => Ok(serde_json::to_value(tracker.goal())?),
    }
}

/// Parse a `--json` request body; a bad body is the caller's mistake
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Validation {
        field: "json".into(),
        reason: e.to_string(),
    })
}

fn print_envelope(envelope: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}
