//! Calorie estimation heuristic.
//!
//! Calories are `duration_minutes * 5 * intensity_multiplier`, where the
//! multiplier starts at 1.0 and grows with every cardio or strength exercise:
//! - Cardio keywords add 0.3
//! - Strength keywords add 0.2 (only when no cardio keyword matched)
//!
//! The multiplier is tracked in tenths so the result is exact integer math.

use crate::Exercise;

/// Calories burned per minute before intensity adjustments
pub const BASE_RATE_PER_MINUTE: i64 = 5;

const CARDIO_KEYWORDS: [&str; 5] = ["run", "cardio", "cycle", "swim", "jog"];
const STRENGTH_KEYWORDS: [&str; 4] = ["lift", "weight", "strength", "resistance"];

const BASE_TENTHS: i64 = 10;
const CARDIO_TENTHS: i64 = 3;
const STRENGTH_TENTHS: i64 = 2;

/// Intensity class of a single exercise, inferred from its name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intensity {
    Cardio,
    Strength,
    Neutral,
}

/// Classify an exercise name by keyword (case-insensitive substring match)
pub fn classify(name: &str) -> Intensity {
    let name = name.to_lowercase();
    if CARDIO_KEYWORDS.iter().any(|k| name.contains(k)) {
        Intensity::Cardio
    } else if STRENGTH_KEYWORDS.iter().any(|k| name.contains(k)) {
        Intensity::Strength
    } else {
        Intensity::Neutral
    }
}

/// Intensity multiplier expressed in tenths (10 == 1.0)
pub fn intensity_tenths(exercises: &[Exercise]) -> i64 {
    exercises
        .iter()
        .map(|e| match classify(&e.name) {
            Intensity::Cardio => CARDIO_TENTHS,
            Intensity::Strength => STRENGTH_TENTHS,
            Intensity::Neutral => 0,
        })
        .fold(BASE_TENTHS, |acc, bump| acc + bump)
}

/// Estimate calories burned for a workout, truncated toward zero
///
/// Negative durations are not rejected here; they produce the formula's
/// (non-positive) result. Durations too large for `i64` arithmetic saturate.
pub fn estimate(exercises: &[Exercise], duration_minutes: i64) -> i64 {
    duration_minutes
        .saturating_mul(BASE_RATE_PER_MINUTE)
        .saturating_mul(intensity_tenths(exercises))
        / BASE_TENTHS
}

/// Like [`estimate`], but `None` when the product overflows `i64`
pub fn checked_estimate(exercises: &[Exercise], duration_minutes: i64) -> Option<i64> {
    duration_minutes
        .checked_mul(BASE_RATE_PER_MINUTE)?
        .checked_mul(intensity_tenths(exercises))
        .map(|scaled| scaled / BASE_TENTHS)
}
