/// Create, read, update and delete operations on habits

use crate::domain::{Habit, HabitId};
use crate::service::{storage_failure, HabitService, ServiceError};
use crate::storage::HabitStorage;

impl<S: HabitStorage> HabitService<S> {
    /// Validate and store a new habit with zeroed progress
    pub fn create_habit(&self, name: &str, frequency: &str) -> Result<Habit, ServiceError> {
        let habit = Habit::new(name, frequency)?;
        
        let stored = self
            .storage
            .create_habit(&habit)
            .map_err(storage_failure("create habit"))?;
        
        tracing::info!("Created habit '{}' ({})", stored.name, stored.id);
        Ok(stored)
    }
    
    /// Fetch one habit
    pub fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, ServiceError> {
        self.storage
            .get_habit(habit_id)
            .map_err(storage_failure("retrieve habit"))
    }
    
    /// List every habit, longest current streak first
    pub fn list_habits(&self) -> Result<Vec<Habit>, ServiceError> {
        let mut habits = self
            .storage
            .list_habits()
            .map_err(storage_failure("list habits"))?;
        
        habits.sort_by(|a, b| b.current_streak.cmp(&a.current_streak));
        Ok(habits)
    }
    
    /// Rename a habit and/or change its frequency
    /// 
    /// The stored habit is loaded first and only its name and frequency are
    /// replaced; streak counters always come from storage.
    pub fn update_habit(
        &self,
        habit_id: &HabitId,
        name: &str,
        frequency: &str,
    ) -> Result<Habit, ServiceError> {
        let mut habit = self.get_habit(habit_id).map_err(|err| {
            if let ServiceError::NotFound { .. } = err {
                tracing::warn!("Tried to update non-existing habit {}", habit_id);
            }
            err
        })?;
        
        habit.update(name, frequency)?;
        
        let stored = self
            .storage
            .update_habit(&habit)
            .map_err(storage_failure("update habit"))?;
        
        tracing::info!("Habit '{}' ({}) updated", stored.name, stored.id);
        Ok(stored)
    }
    
    /// Permanently delete a habit
    pub fn delete_habit(&self, habit_id: &HabitId) -> Result<(), ServiceError> {
        let habit = self.get_habit(habit_id).map_err(|err| {
            if let ServiceError::NotFound { .. } = err {
                tracing::warn!("Tried to delete non-existing habit {}", habit_id);
            }
            err
        })?;
        
        self.storage
            .delete_habit(habit_id)
            .map_err(storage_failure("delete habit"))?;
        
        tracing::info!("Habit '{}' ({}) deleted", habit.name, habit.id);
        Ok(())
    }
}
