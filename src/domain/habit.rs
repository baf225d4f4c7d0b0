/// Habit entity and related functionality
/// 
/// This module defines the Habit struct that represents a trackable habit
/// together with its progress counters, and the validation applied before
/// a habit is created or renamed.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{Frequency, HabitId, DomainError};

/// A habit represents something the user wants to do regularly
/// 
/// Besides the user-supplied name and frequency, a habit carries its own
/// streak bookkeeping. `last_completed_at` is set exactly when
/// `total_completions` is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// How often this habit should be performed
    pub frequency: Frequency,
    /// Consecutive on-schedule completions
    pub current_streak: u32,
    /// When the habit was last marked completed (None if never)
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Number of completion events ever recorded
    pub total_completions: u32,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// When this habit was last written to storage
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    /// 
    /// The frequency is given as text because that is how clients send it;
    /// it must be one of `daily`, `weekly`, `monthly`.
    pub fn new(name: &str, frequency: &str) -> Result<Self, DomainError> {
        let frequency = validate_habit(name, frequency)?;
        let now = Utc::now();
        
        Ok(Self {
            id: HabitId::new(),
            name: name.to_string(),
            frequency,
            current_streak: 0,
            last_completed_at: None,
            total_completions: 0,
            created_at: now,
            updated_at: now,
        })
    }
    
    /// Create a habit from existing data (used when loading from database)
    /// 
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading habits from the database.
    pub fn from_existing(
        id: HabitId,
        name: String,
        frequency: Frequency,
        current_streak: u32,
        last_completed_at: Option<DateTime<Utc>>,
        total_completions: u32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            frequency,
            current_streak,
            last_completed_at,
            total_completions,
            created_at,
            updated_at,
        }
    }
    
    /// Replace the name and frequency, re-validating both
    /// 
    /// Streak counters are left alone; only the descriptive fields change.
    /// On error the habit is not modified.
    pub fn update(&mut self, name: &str, frequency: &str) -> Result<(), DomainError> {
        let frequency = validate_habit(name, frequency)?;
        self.name = name.to_string();
        self.frequency = frequency;
        Ok(())
    }
}

/// Validate a habit's name and frequency text
/// 
/// Returns the parsed frequency so callers don't parse twice.
pub fn validate_habit(name: &str, frequency: &str) -> Result<Frequency, DomainError> {
    validate_name(name)?;
    frequency.parse()
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidHabitName(
            "Habit name cannot be empty".to_string()
        ));
    }
    Ok(())
}
