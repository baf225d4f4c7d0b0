/// Streak calculation for habit completions
/// 
/// This module holds the completion engine: given a habit's stored state and
/// the time of a new completion event, it decides the next streak value and
/// advances the completion counters. It never reads the clock itself so the
/// rules can be exercised with fixed timestamps.

use serde::Serialize;
use chrono::{DateTime, Duration, Utc};
use crate::domain::{Frequency, Habit};

/// How a completion event changed the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// The habit had never been completed before
    Started,
    /// The previous completion was within the grace window
    Continued,
    /// The grace window had lapsed, so counting starts again at 1
    Reset,
}

impl Frequency {
    /// Time allowed between completions before the streak resets
    /// 
    /// Monthly habits have no window: they never reset.
    pub fn grace_window(&self) -> Option<Duration> {
        match self {
            Frequency::Daily => Some(Duration::hours(24)),
            Frequency::Weekly => Some(Duration::days(7)),
            Frequency::Monthly => None,
        }
    }
}

/// Decide what a completion at `now` does to the habit's streak
/// 
/// The decision is made against the *previous* completion time. A window
/// counts as lapsed only when `last + window` is strictly before `now`, so a
/// completion exactly on the boundary still continues the streak, as does a
/// previous completion that lies in the future.
pub fn next_streak(habit: &Habit, now: DateTime<Utc>) -> (StreakTransition, u32) {
    let Some(last) = habit.last_completed_at else {
        return (StreakTransition::Started, 1);
    };
    
    let lapsed = habit
        .frequency
        .grace_window()
        .map_or(false, |window| last + window < now);
    
    if lapsed {
        (StreakTransition::Reset, 1)
    } else {
        (StreakTransition::Continued, habit.current_streak.saturating_add(1))
    }
}

/// Apply one completion event at `now` and return the updated habit
/// 
/// The streak is decided first, then `last_completed_at` and
/// `total_completions` are advanced unconditionally.
pub fn complete(habit: &Habit, now: DateTime<Utc>) -> (Habit, StreakTransition) {
    let (transition, streak) = next_streak(habit, now);
    
    let mut updated = habit.clone();
    updated.current_streak = streak;
    updated.last_completed_at = Some(now);
    updated.total_completions = habit.total_completions.saturating_add(1);
    
    (updated, transition)
}

/// Get an encouraging message for the streak a habit has just reached
pub fn streak_message(transition: StreakTransition, current_streak: u32) -> String {
    match (transition, current_streak) {
        (StreakTransition::Started, _) => "Great start! Your first completion is in.".to_string(),
        (StreakTransition::Reset, _) => "Welcome back! Your streak starts again today.".to_string(),
        (_, 0..=1) => "Habit completed. Keep the momentum going.".to_string(),
        (_, 2..=6) => format!("Nice work! {} in a row. You're building a strong habit.", current_streak),
        (_, 7..=29) => format!("Excellent! {} in a row. You're in the groove now!", current_streak),
        _ => format!("Incredible! {} in a row. This is second nature now.", current_streak),
    }
}
