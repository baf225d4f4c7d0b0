/// Habit service: the use-cases exposed to the HTTP layer
/// 
/// The service sequences validation, lookup, the completion engine and
/// storage calls. It is the only place that changes business state; the
/// storage it is built with is passed in explicitly.

mod complete;
mod habits;

pub use complete::*;

use thiserror::Error;
use crate::domain::DomainError;
use crate::storage::{HabitStorage, StorageError};

/// Errors returned by service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
    
    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: String },
    
    #[error("Persistence failure: {0}")]
    Persistence(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::HabitNotFound { habit_id } => ServiceError::NotFound { habit_id },
            other => ServiceError::Persistence(other),
        }
    }
}

/// Convert a storage error, logging the internal detail of real failures
/// 
/// Callers only ever see the generic message; the detail stays in the logs.
fn storage_failure(action: &'static str) -> impl FnOnce(StorageError) -> ServiceError {
    move |err| {
        let err = ServiceError::from(err);
        if let ServiceError::Persistence(ref inner) = err {
            tracing::error!("Failed to {}: {}", action, inner);
        }
        err
    }
}

/// Use-case layer over a habit storage backend
pub struct HabitService<S> {
    storage: S,
}

impl<S: HabitStorage> HabitService<S> {
    /// Create a service over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
    
    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
