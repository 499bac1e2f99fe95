//! Core domain types for the fitlog system.
//!
//! This module defines the records that are persisted and the inputs and
//! rollups exchanged with the request layer:
//! - Workouts and their exercises
//! - Reminders
//! - The weekly goal and progress against it
//! - Statistics

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Default message attached to reminders created without one
pub const DEFAULT_REMINDER_MESSAGE: &str = "Workout Reminder";

/// Anything stored in a collection with an integer id
pub trait Record {
    fn id(&self) -> u64;
}

// ============================================================================
// Workouts
// ============================================================================

/// A single exercise within a workout.
///
/// Only `name` is interpreted (by the calorie estimator); everything else the
/// caller sends is kept verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exercise {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// A recorded workout session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub notes: String,
    pub total_calories: i64,
}

impl Record for Workout {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Caller input for creating a workout.
///
/// Fields are optional so that a missing one can be reported by name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkoutDraft {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration_minutes: Option<i64>,
    pub exercises: Option<Vec<Exercise>>,
    pub notes: Option<String>,
    pub date: Option<String>,
}

// ============================================================================
// Reminders
// ============================================================================

/// A scheduled workout reminder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u64,
    pub date: String,
    pub message: String,
}

impl Record for Reminder {
    fn id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// Goals and rollups
// ============================================================================

/// The active weekly goal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoal {
    pub session_goal: i64,
    pub calorie_goal: i64,
}

/// Caller input for setting the weekly goal
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GoalDraft {
    pub session_goal: Option<i64>,
    pub calorie_goal: Option<i64>,
}

/// Progress for the current calendar week
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub sessions_completed: u64,
    pub calories_burned: i64,
    pub session_goal: i64,
    pub calorie_goal: i64,
    pub week_start: String,
    pub week_end: String,
}

/// Aggregate statistics over every stored workout
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_workouts: u64,
    pub total_duration: i64,
    pub total_calories: i64,
    pub average_duration: i64,
    pub recent_workouts_30d: u64,
    pub workout_types: BTreeMap<String, u64>,
}
