//! CSV export of workouts.

use crate::{Result, Workout};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: u64,
    date: &'a str,
    #[serde(rename = "type")]
    workout_type: &'a str,
    duration_minutes: i64,
    total_calories: i64,
    exercises: String,
    notes: &'a str,
}

impl<'a> From<&'a Workout> for CsvRow<'a> {
    fn from(workout: &'a Workout) -> Self {
        let exercises = workout
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(";");

        CsvRow {
            id: workout.id,
            date: &workout.date,
            workout_type: &workout.workout_type,
            duration_minutes: workout.duration_minutes,
            total_calories: workout.total_calories,
            exercises,
            notes: &workout.notes,
        }
    }
}

/// Write `workouts` to a fresh CSV file at `path`, returning the row count
///
/// The file is replaced if it exists and synced to disk before returning.
pub fn export_workouts(workouts: &[Workout], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for workout in workouts {
        writer.serialize(CsvRow::from(workout))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(workouts.len())
}
