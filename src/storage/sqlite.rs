/// SQLite implementation of the habit storage interface
/// 
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits. It handles all SQL queries and data conversion.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::domain::{Frequency, Habit, HabitId};
use crate::storage::{migrations, HabitStorage, StorageError};

const HABIT_COLUMNS: &str = "id, name, frequency, current_streak, last_completed_at, \
                             total_completions, created_at, updated_at";

/// SQLite-based storage implementation
/// 
/// The connection sits behind a mutex so the storage can be shared between
/// request handlers; every statement runs while holding the lock.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    /// 
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        
        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }
    
    /// Create a storage instance backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }
    
    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::initialize_database(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
    
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Database lock poisoned".to_string()))
    }
    
    fn query_habits(&self, sql: &str) -> Result<Vec<Habit>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let habits = stmt
            .query_map([], habit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(habits)
    }
}

/// Build a Habit from a row selected with `HABIT_COLUMNS`
fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let id_str: String = row.get(0)?;
    let id = HabitId::from_string(&id_str)
        .map_err(|_| invalid_column(0, "Invalid UUID"))?;
    
    let frequency_str: String = row.get(2)?;
    let frequency: Frequency = frequency_str
        .parse()
        .map_err(|_| invalid_column(2, "Invalid frequency"))?;
    
    let last_completed_at = row
        .get::<_, Option<String>>(4)?
        .map(|s| parse_timestamp(4, &s))
        .transpose()?;
    
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;
    
    Ok(Habit::from_existing(
        id,
        row.get(1)?, // name
        frequency,
        row.get(3)?, // current_streak
        last_completed_at,
        row.get(5)?, // total_completions
        parse_timestamp(6, &created_at_str)?,
        parse_timestamp(7, &updated_at_str)?,
    ))
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid_column(column, "Invalid datetime"))
}

fn invalid_column(column: usize, message: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(column, message.to_string(), rusqlite::types::Type::Text)
}

impl HabitStorage for SqliteStorage {
    /// Insert a new habit into the database
    fn create_habit(&self, habit: &Habit) -> Result<Habit, StorageError> {
        let mut stored = habit.clone();
        stored.updated_at = Utc::now();
        
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO habits (
                id, name, frequency, current_streak, last_completed_at,
                total_completions, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                stored.id.to_string(),
                stored.name,
                stored.frequency.as_str(),
                stored.current_streak,
                stored.last_completed_at.map(|t| t.to_rfc3339()),
                stored.total_completions,
                stored.created_at.to_rfc3339(),
                stored.updated_at.to_rfc3339(),
            ],
        )?;
        
        tracing::debug!("Created habit: {} ({})", stored.name, stored.id);
        Ok(stored)
    }
    
    /// Get a habit by its ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS))?;
        
        match stmt.query_row(params![habit_id.to_string()], habit_from_row) {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }
    
    /// List every habit, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        self.query_habits(&format!(
            "SELECT {} FROM habits ORDER BY created_at DESC",
            HABIT_COLUMNS
        ))
    }
    
    /// Update the descriptive fields of an existing habit
    /// 
    /// Only name and frequency are written so a concurrent completion's
    /// counters are not overwritten with stale values.
    fn update_habit(&self, habit: &Habit) -> Result<Habit, StorageError> {
        let mut stored = habit.clone();
        stored.updated_at = Utc::now();
        
        let conn = self.lock()?;
        let rows_affected = conn.execute(
            "UPDATE habits SET
                name = ?2,
                frequency = ?3,
                updated_at = ?4
             WHERE id = ?1",
            params![
                stored.id.to_string(),
                stored.name,
                stored.frequency.as_str(),
                stored.updated_at.to_rfc3339(),
            ],
        )?;
        
        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: stored.id.to_string(),
            });
        }
        
        tracing::debug!("Updated habit: {} ({})", stored.name, stored.id);
        Ok(stored)
    }
    
    /// Permanently delete a habit
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let rows_affected = conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;
        
        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }
        
        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }
    
    /// Write the completion counters inside a transaction
    fn save_completion(&self, habit: &Habit) -> Result<Habit, StorageError> {
        let mut stored = habit.clone();
        stored.updated_at = Utc::now();
        
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        
        let rows_affected = tx.execute(
            "UPDATE habits SET
                current_streak = ?2,
                last_completed_at = ?3,
                total_completions = ?4,
                updated_at = ?5
             WHERE id = ?1",
            params![
                stored.id.to_string(),
                stored.current_streak,
                stored.last_completed_at.map(|t| t.to_rfc3339()),
                stored.total_completions,
                stored.updated_at.to_rfc3339(),
            ],
        )?;
        
        // Dropping the transaction without committing rolls it back
        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: stored.id.to_string(),
            });
        }
        
        tx.commit()?;
        
        tracing::debug!(
            "Saved completion for habit {}: streak {}, total {}",
            stored.id,
            stored.current_streak,
            stored.total_completions
        );
        Ok(stored)
    }
    
    /// List habits that currently have a streak going
    fn list_streaks(&self) -> Result<Vec<Habit>, StorageError> {
        self.query_habits(&format!(
            "SELECT {} FROM habits WHERE current_streak > 0 ORDER BY current_streak DESC, created_at DESC",
            HABIT_COLUMNS
        ))
    }
}
