//! Statistics rollup over stored workouts.

use crate::{timestamp, Result, Stats, Workout};
use chrono::{Duration, NaiveDateTime};

/// Size of the "recent workouts" window
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Summarize `workouts` relative to `now`
///
/// Fails with [`crate::Error::MalformedDate`] if any stored date cannot be
/// parsed; a partial count would silently misreport.
pub fn compute(workouts: &[Workout], now: NaiveDateTime) -> Result<Stats> {
    if workouts.is_empty() {
        return Ok(Stats::default());
    }

    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let mut stats = Stats {
        total_workouts: workouts.len() as u64,
        ..Stats::default()
    };

    for workout in workouts {
        stats.total_duration = stats.total_duration.saturating_add(workout.duration_minutes);
        stats.total_calories = stats.total_calories.saturating_add(workout.total_calories);

        if timestamp::parse(&workout.date)? > cutoff {
            stats.recent_workouts_30d += 1;
        }

        *stats
            .workout_types
            .entry(workout.workout_type.clone())
            .or_insert(0) += 1;
    }

    stats.average_duration = stats.total_duration.div_euclid(workouts.len() as i64);

    tracing::debug!(
        "Computed stats over {} workouts ({} recent)",
        stats.total_workouts,
        stats.recent_workouts_30d
    );
    Ok(stats)
}
