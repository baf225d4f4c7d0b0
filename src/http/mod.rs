/// HTTP surface of the habit tracker
/// 
/// Routes JSON requests under `/api/habits` to the habit service and maps
/// service errors to status codes.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::service::HabitService;
use crate::storage::HabitStorage;

/// Service handle shared across handlers
pub type SharedService<S> = Arc<HabitService<S>>;

/// Create the API router
/// 
/// When `static_dir` is given its files are served under `/static`.
pub fn create_router<S>(service: SharedService<S>, static_dir: Option<&Path>) -> Router
where
    S: HabitStorage + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/habits", post(handlers::create_habit::<S>).get(handlers::list_habits::<S>))
        .route("/api/habits/streaks", get(handlers::list_streaks::<S>))
        .route("/api/habits/with_streaks", get(handlers::list_streaks::<S>))
        .route(
            "/api/habits/:id",
            get(handlers::get_habit::<S>)
                .put(handlers::update_habit::<S>)
                .delete(handlers::delete_habit::<S>),
        )
        .route("/api/habits/:id/mark_complete", patch(handlers::mark_complete::<S>));
    
    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }
    
    router.layer(TraceLayer::new_for_http()).with_state(service)
}
