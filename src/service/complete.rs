/// Completion workflow and streak listing

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{self, Habit, HabitId, StreakTransition};
use crate::service::{storage_failure, HabitService, ServiceError};
use crate::storage::HabitStorage;

/// Result of marking a habit completed
#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub habit: Habit,
    pub transition: StreakTransition,
}

impl<S: HabitStorage> HabitService<S> {
    /// Mark a habit completed now
    pub fn mark_completed(&self, habit_id: &HabitId) -> Result<CompletionOutcome, ServiceError> {
        self.mark_completed_at(habit_id, Utc::now())
    }
    
    /// Mark a habit completed at the given time
    /// 
    /// Loads the stored habit, runs the completion engine against it and
    /// writes the new counters in one transaction. Two completions racing on
    /// the same habit are not serialized beyond that transaction: the last
    /// commit wins.
    pub fn mark_completed_at(
        &self,
        habit_id: &HabitId,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome, ServiceError> {
        let habit = self.get_habit(habit_id).map_err(|err| {
            if let ServiceError::NotFound { .. } = err {
                tracing::warn!("Tried to complete non-existing habit {}", habit_id);
            }
            err
        })?;
        
        let (updated, transition) = domain::complete(&habit, now);
        
        let stored = self
            .storage
            .save_completion(&updated)
            .map_err(storage_failure("mark habit as completed"))?;
        
        tracing::info!(
            "Habit {} marked as completed ({:?}). Current streak: {}",
            stored.id,
            transition,
            stored.current_streak
        );
        
        Ok(CompletionOutcome { habit: stored, transition })
    }
    
    /// Habits with a streak going, longest first
    pub fn list_streaks(&self) -> Result<Vec<Habit>, ServiceError> {
        self.storage
            .list_streaks()
            .map_err(storage_failure("list habit streaks"))
    }
}
