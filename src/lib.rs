/// Public library interface for the Habit Tracker API server
/// 
/// This module exports the server implementation and the public types
/// that can be used by other applications or tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod service;
pub mod http;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteStorage, StorageError, HabitStorage};
pub use service::{CompletionOutcome, HabitService, ServiceError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),
    
    #[error("Service error: {0}")]
    Service(#[from] service::ServiceError),
    
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main habit tracker server exposing the JSON API over HTTP
/// 
/// This server manages habit data through a SQLite database and hands
/// requests to the habit service.
pub struct HabitTrackerServer {
    service: Arc<HabitService<SqliteStorage>>,
    static_dir: Option<PathBuf>,
}

impl HabitTrackerServer {
    /// Create a new habit tracker server with the specified database path
    /// 
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Tracker server with database: {:?}", db_path);
        
        let storage = SqliteStorage::new(db_path)?;
        
        Ok(Self {
            service: Arc::new(HabitService::new(storage)),
            static_dir: None,
        })
    }
    
    /// Serve files from `dir` under `/static`
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }
    
    /// Build the HTTP router for this server
    pub fn router(&self) -> axum::Router {
        http::create_router(self.service.clone(), self.static_dir.as_deref())
    }
    
    /// Bind to `addr` and serve requests until Ctrl-C is received
    pub async fn run(self, addr: SocketAddr) -> Result<(), ServerError> {
        // Test database connectivity
        let habits = self.service.list_habits()?;
        tracing::info!("Server starting, found {} existing habits", habits.len());
        
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);
        
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        
        Ok(())
    }
    
    /// Get a reference to the habit service (useful for testing)
    pub fn service(&self) -> &HabitService<SqliteStorage> {
        &self.service
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
