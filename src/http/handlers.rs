/// Request handlers for the habit API
/// 
/// Service calls hit SQLite synchronously, so each one runs on tokio's
/// blocking pool instead of an async worker thread.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, SharedService};
use crate::domain::{streak_message, Habit, HabitId, StreakTransition};
use crate::service::{HabitService, ServiceError};
use crate::storage::HabitStorage;

/// Body of create and update requests
/// 
/// Missing fields bind as empty strings so they fail validation rather than
/// JSON parsing.
#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub frequency: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response from marking a habit completed
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub message: String,
    pub transition: StreakTransition,
    pub current_streak: u32,
    pub total_completions: u32,
    pub last_completed_at: Option<DateTime<Utc>>,
}

fn parse_id(raw: &str) -> Result<HabitId, ApiError> {
    HabitId::from_string(raw).map_err(|e| {
        tracing::debug!("Rejected habit ID '{}': {}", raw, e);
        ApiError::BadRequest("Invalid habit ID")
    })
}

fn parse_body(
    payload: Result<Json<HabitRequest>, JsonRejection>,
    message: &'static str,
) -> Result<HabitRequest, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        ApiError::BadRequest(message)
    })
}

/// Run a service call on the blocking pool
async fn run_blocking<S, T, F>(service: &SharedService<S>, call: F) -> Result<Result<T, ServiceError>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&HabitService<S>) -> Result<T, ServiceError> + Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || call(&service)).await.map_err(|e| {
        tracing::error!("Service task panicked: {}", e);
        ApiError::Internal("Internal server error")
    })
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/habits
pub async fn create_habit<S>(
    State(service): State<SharedService<S>>,
    payload: Result<Json<HabitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Habit>), ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let body = parse_body(payload, "Invalid input to create habit")?;
    
    let habit = run_blocking(&service, move |service| service.create_habit(&body.name, &body.frequency))
        .await?
        .map_err(|e| {
            tracing::debug!("Error creating habit: {}", e);
            ApiError::Internal("Failed to create habit. Please try again later.")
        })?;
    
    Ok((StatusCode::CREATED, Json(habit)))
}

/// GET /api/habits
pub async fn list_habits<S>(State(service): State<SharedService<S>>) -> Result<Json<Vec<Habit>>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let habits = run_blocking(&service, |service| service.list_habits())
        .await?
        .map_err(|_| ApiError::Internal("Failed to retrieve all habits. Please try again later."))?;
    
    Ok(Json(habits))
}

/// GET /api/habits/:id
pub async fn get_habit<S>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<Json<Habit>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    
    match run_blocking(&service, move |service| service.get_habit(&id)).await? {
        Ok(habit) => Ok(Json(habit)),
        Err(ServiceError::NotFound { .. }) => Err(ApiError::NotFound("Habit not found")),
        Err(_) => Err(ApiError::Internal("Failed to retrieve habit. Please try again later.")),
    }
}

/// PUT /api/habits/:id
pub async fn update_habit<S>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
    payload: Result<Json<HabitRequest>, JsonRejection>,
) -> Result<Json<Habit>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let body = parse_body(payload, "Invalid input to update habit")?;
    
    let habit = run_blocking(&service, move |service| {
        service.update_habit(&id, &body.name, &body.frequency)
    })
    .await?
    .map_err(|e| {
        tracing::debug!("Error updating habit {}: {}", id, e);
        ApiError::Internal("Failed to update habit. Please try again later.")
    })?;
    
    Ok(Json(habit))
}

/// DELETE /api/habits/:id
pub async fn delete_habit<S>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    
    run_blocking(&service, move |service| service.delete_habit(&id))
        .await?
        .map_err(|e| {
            tracing::debug!("Error deleting habit {}: {}", id, e);
            ApiError::Internal("Failed to delete habit. Please try again later.")
        })?;
    
    Ok(Json(MessageResponse { message: "Habit deleted".to_string() }))
}

/// PATCH /api/habits/:id/mark_complete
pub async fn mark_complete<S>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<Json<CompletionResponse>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    
    let outcome = run_blocking(&service, move |service| service.mark_completed(&id))
        .await?
        .map_err(|e| match e {
            ServiceError::NotFound { .. } => ApiError::NotFound("Habit not found"),
            _ => ApiError::Internal("Failed to mark habit as completed. Please try again later."),
        })?;
    
    let habit = outcome.habit;
    Ok(Json(CompletionResponse {
        message: streak_message(outcome.transition, habit.current_streak),
        transition: outcome.transition,
        current_streak: habit.current_streak,
        total_completions: habit.total_completions,
        last_completed_at: habit.last_completed_at,
    }))
}

/// GET /api/habits/streaks
pub async fn list_streaks<S>(State(service): State<SharedService<S>>) -> Result<Json<Vec<Habit>>, ApiError>
where
    S: HabitStorage + Send + Sync + 'static,
{
    let habits = run_blocking(&service, |service| service.list_streaks())
        .await?
        .map_err(|_| ApiError::Internal("Failed to retrieve all habits with streaks. Please try again later."))?;
    
    Ok(Json(habits))
}
