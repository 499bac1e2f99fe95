//! Workout store: creation, lookup, deletion and listing of workouts.

use crate::calories;
use crate::gateway::Gateway;
use crate::{timestamp, Collection, Error, IdStrategy, Result, Workout, WorkoutDraft};
use chrono::NaiveDateTime;

/// Document name of the workouts collection
pub const WORKOUTS: &str = "workouts";

/// Owns the workouts collection and writes it back after every change
pub struct WorkoutStore<G: Gateway> {
    gateway: G,
    ids: IdStrategy,
    workouts: Collection<Workout>,
}

impl<G: Gateway> WorkoutStore<G> {
    /// Load the collection through the gateway
    pub fn open(gateway: G, ids: IdStrategy) -> Self {
        let workouts: Collection<Workout> = gateway.load(WORKOUTS);
        tracing::debug!("Opened workout store with {} workouts", workouts.len());
        Self {
            gateway,
            ids,
            workouts,
        }
    }

    /// Every stored workout in insertion order
    pub fn all(&self) -> &[Workout] {
        self.workouts.records()
    }

    /// Record a new workout dated now unless the draft carries a date
    pub fn add(&mut self, draft: WorkoutDraft) -> Result<Workout> {
        self.add_at(draft, timestamp::now())
    }

    /// Record a new workout, using `now` when the draft has no date
    pub fn add_at(&mut self, draft: WorkoutDraft, now: NaiveDateTime) -> Result<Workout> {
        let workout_type = draft
            .workout_type
            .ok_or_else(|| Error::missing_field("type"))?;
        let duration_minutes = draft
            .duration_minutes
            .ok_or_else(|| Error::missing_field("duration_minutes"))?;
        let exercises = draft
            .exercises
            .ok_or_else(|| Error::missing_field("exercises"))?;

        if duration_minutes < 0 {
            return Err(Error::Validation {
                field: "duration_minutes".into(),
                reason: format!("must not be negative (got {})", duration_minutes),
            });
        }

        let date = match draft.date {
            Some(date) => timestamp::canonicalize(&date)?,
            None => timestamp::format(now),
        };

        let total_calories =
            calories::checked_estimate(&exercises, duration_minutes).ok_or_else(|| {
                Error::Validation {
                    field: "duration_minutes".into(),
                    reason: format!("too large to estimate calories (got {})", duration_minutes),
                }
            })?;

        let mut workouts = self.workouts.clone();
        let workout = Workout {
            id: workouts.assign_id(self.ids),
            date,
            workout_type,
            duration_minutes,
            exercises,
            notes: draft.notes.unwrap_or_default(),
            total_calories,
        };

        workouts.push(workout.clone());
        self.gateway.save(WORKOUTS, &workouts)?;
        self.workouts = workouts;

        tracing::info!(
            "Added workout {} ({}, {} min, {} kcal)",
            workout.id,
            workout.workout_type,
            workout.duration_minutes,
            workout.total_calories
        );
        Ok(workout)
    }

    /// Workouts newest first, optionally truncated (a limit of 0 means no limit)
    pub fn list(&self, limit: Option<usize>) -> Vec<Workout> {
        let mut sorted = self.workouts.records().to_vec();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = limit.filter(|l| *l > 0) {
            sorted.truncate(limit);
        }
        sorted
    }

    pub fn get(&self, id: u64) -> Result<&Workout> {
        self.workouts
            .find(id)
            .ok_or(Error::NotFound { kind: "workout", id })
    }

    /// Remove a workout; returns false (and writes nothing) if the id is unknown
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        if self.workouts.find(id).is_none() {
            tracing::debug!("Delete requested for unknown workout {}", id);
            return Ok(false);
        }

        let mut workouts = self.workouts.clone();
        workouts.remove(id);
        self.gateway.save(WORKOUTS, &workouts)?;
        self.workouts = workouts;
        tracing::info!("Deleted workout {}", id);
        Ok(true)
    }
}
