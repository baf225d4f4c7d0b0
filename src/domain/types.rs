/// Core value types used throughout the domain layer
/// 
/// This module defines the habit identifier and the closed set of
/// frequencies a habit can recur on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
/// 
/// This is a wrapper around UUID to provide type safety. Identifiers are
/// assigned once when the habit is created and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
    
    /// Create a habit ID from a string (path segments, database rows)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How often a habit is expected to be performed
/// 
/// The frequency decides whether a late completion resets the streak.
/// Only daily and weekly habits have a reset window; monthly habits keep
/// counting up no matter how much time passes between completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Expected once every day
    Daily,
    /// Expected once every week
    Weekly,
    /// Expected once every month (no reset window)
    Monthly,
}

impl Frequency {
    /// Every accepted frequency, in display order
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];
    
    /// The lowercase text form used on the wire and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;
    
    /// Parse the exact lowercase spelling; anything else, including
    /// surrounding whitespace, is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(DomainError::InvalidFrequency(format!(
                "'{}' is not one of daily, weekly, monthly",
                other
            ))),
        }
    }
}
