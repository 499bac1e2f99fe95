//! The tracker service: one object owning every store.
//!
//! Built once at startup and handed to the request layer. Operations that
//! depend on the clock come in two forms: the plain one reads local time,
//! the `_at` form takes `now` explicitly.

use crate::gateway::{Gateway, JsonFileGateway};
use crate::goals::GoalBook;
use crate::reminders::ReminderStore;
use crate::workouts::WorkoutStore;
use crate::{
    stats, timestamp, Config, GoalDraft, Progress, Reminder, Result, Stats, WeeklyGoal, Workout,
    WorkoutDraft,
};
use chrono::NaiveDateTime;

pub struct Tracker<G: Gateway> {
    workouts: WorkoutStore<G>,
    reminders: ReminderStore<G>,
    goals: GoalBook<G>,
}

impl Tracker<JsonFileGateway> {
    /// Open the JSON files in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::open(JsonFileGateway::new(&config.data.data_dir), config)
    }
}

impl<G: Gateway> Tracker<G> {
    pub fn open(gateway: G, config: &Config) -> Self {
        let ids = config.ids.strategy;
        tracing::debug!("Opening tracker with {:?} id assignment", ids);
        Self {
            workouts: WorkoutStore::open(gateway.clone(), ids),
            reminders: ReminderStore::open(gateway.clone(), ids),
            goals: GoalBook::open(gateway),
        }
    }

    // Workouts

    pub fn list_workouts(&self, limit: Option<usize>) -> Vec<Workout> {
        self.workouts.list(limit)
    }

    pub fn add_workout(&mut self, draft: WorkoutDraft) -> Result<Workout> {
        self.workouts.add(draft)
    }

    pub fn get_workout(&self, id: u64) -> Result<Workout> {
        self.workouts.get(id).cloned()
    }

    pub fn delete_workout(&mut self, id: u64) -> Result<bool> {
        self.workouts.delete(id)
    }

    pub fn workouts(&self) -> &[Workout] {
        self.workouts.all()
    }

    pub fn stats(&self) -> Result<Stats> {
        self.stats_at(timestamp::now())
    }

    pub fn stats_at(&self, now: NaiveDateTime) -> Result<Stats> {
        stats::compute(self.workouts.all(), now)
    }

    // Reminders

    pub fn add_reminder(&mut self, date: Option<&str>, message: Option<String>) -> Result<Reminder> {
        self.reminders.add(date, message)
    }

    pub fn upcoming_reminders(&self) -> Result<Vec<Reminder>> {
        self.reminders.upcoming(timestamp::now())
    }

    pub fn upcoming_reminders_at(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        self.reminders.upcoming(now)
    }

    // Goals

    pub fn set_goal(&mut self, draft: GoalDraft) -> Result<WeeklyGoal> {
        self.goals.set(draft)
    }

    pub fn goal(&self) -> WeeklyGoal {
        self.goals.get()
    }

    pub fn progress(&self) -> Result<Progress> {
        self.progress_at(timestamp::now())
    }

    pub fn progress_at(&self, now: NaiveDateTime) -> Result<Progress> {
        self.goals.progress(self.workouts.all(), now)
    }
}
