/// Domain module containing core business logic and data types
/// 
/// This module defines the Habit entity, its validation rules, and the
/// completion engine that advances streaks. Nothing in here touches the
/// database or the network.

pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),
    
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}
