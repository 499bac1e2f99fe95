//! Weekly goal storage and progress against the current calendar week.
//!
//! The goal is either unset (reported as zeros) or set to explicit values.
//! Only [`GoalBook::set`] changes it; it does not expire at week boundaries.

use crate::gateway::Gateway;
use crate::{timestamp, Error, GoalDraft, Progress, Result, WeeklyGoal, Workout};
use chrono::{Duration, NaiveDateTime};

/// Document name of the stored goal
pub const GOALS: &str = "goals";

/// Length of the reported week window after its Monday start
pub const WEEK_SPAN_DAYS: i64 = 6;

pub struct GoalBook<G: Gateway> {
    gateway: G,
    goal: Option<WeeklyGoal>,
}

impl<G: Gateway> GoalBook<G> {
    pub fn open(gateway: G) -> Self {
        let goal: Option<WeeklyGoal> = gateway.load(GOALS);
        tracing::debug!("Opened goal book (goal set: {})", goal.is_some());
        Self { gateway, goal }
    }

    pub fn is_set(&self) -> bool {
        self.goal.is_some()
    }

    /// Replace the weekly goal; both fields are required
    pub fn set(&mut self, draft: GoalDraft) -> Result<WeeklyGoal> {
        let goal = WeeklyGoal {
            session_goal: draft
                .session_goal
                .ok_or_else(|| Error::missing_field("session_goal"))?,
            calorie_goal: draft
                .calorie_goal
                .ok_or_else(|| Error::missing_field("calorie_goal"))?,
        };

        self.gateway.save(GOALS, &Some(goal))?;
        self.goal = Some(goal);

        tracing::info!(
            "Weekly goal set to {} sessions / {} kcal",
            goal.session_goal,
            goal.calorie_goal
        );
        Ok(goal)
    }

    /// The stored goal, or zeros when none has been set
    pub fn get(&self) -> WeeklyGoal {
        self.goal.unwrap_or_default()
    }

    /// Progress of `workouts` toward the goal for the week containing `now`
    pub fn progress(&self, workouts: &[Workout], now: NaiveDateTime) -> Result<Progress> {
        compute_progress(workouts, self.get(), now)
    }
}

/// Count sessions and calories from Monday 00:00 of `now`'s week onward
///
/// Workouts dated after the end of the week are still counted; only the
/// lower bound filters.
pub fn compute_progress(
    workouts: &[Workout],
    goal: WeeklyGoal,
    now: NaiveDateTime,
) -> Result<Progress> {
    let week_start = timestamp::start_of_week(now);
    let week_end = week_start + Duration::days(WEEK_SPAN_DAYS);

    let mut sessions_completed = 0;
    let mut calories_burned: i64 = 0;
    for workout in workouts {
        if timestamp::parse(&workout.date)? >= week_start {
            sessions_completed += 1;
            calories_burned = calories_burned.saturating_add(workout.total_calories);
        }
    }

    Ok(Progress {
        sessions_completed,
        calories_burned,
        session_goal: goal.session_goal,
        calorie_goal: goal.calorie_goal,
        week_start: timestamp::format(week_start),
        week_end: timestamp::format(week_end),
    })
}
