/// Storage layer for persisting habit data
/// 
/// This module defines the storage capability the service depends on and
/// provides the SQLite implementation of it.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),
    
    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),
    
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },
    
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
/// 
/// The service only ever talks to storage through this trait, so tests can
/// substitute an in-memory or failing implementation. Implementations stamp
/// `updated_at` on every write and hand the stored record back.
pub trait HabitStorage {
    /// Insert a new habit
    fn create_habit(&self, habit: &Habit) -> Result<Habit, StorageError>;
    
    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;
    
    /// List every habit, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;
    
    /// Overwrite an existing habit
    fn update_habit(&self, habit: &Habit) -> Result<Habit, StorageError>;
    
    /// Permanently remove a habit
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;
    
    /// Persist the completion fields of a habit in a single transaction
    /// 
    /// Either the streak, last completion time and total are all written,
    /// or none of them are.
    fn save_completion(&self, habit: &Habit) -> Result<Habit, StorageError>;
    
    /// List habits with a positive streak, longest streak first
    fn list_streaks(&self) -> Result<Vec<Habit>, StorageError>;
}
