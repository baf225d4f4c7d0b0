/// Main entry point for the Habit Tracker API server
/// 
/// This file sets up logging, parses command line arguments (with
/// environment variable fallbacks), and starts the HTTP server.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use habit_tracker_api::HabitTrackerServer;

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".habit_tracker")),
        dirs::data_dir().map(|p| p.join("habit_tracker")),
        dirs::config_dir().map(|p| p.join("habit_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".habit_tracker")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_err() {
            continue;
        }
        // Make sure the directory is actually writable
        let test_file = potential_path.join(".test_write");
        if std::fs::write(&test_file, "test").is_ok() {
            let _ = std::fs::remove_file(&test_file);
            return Ok(potential_path.join("habits.db"));
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_path = std::env::temp_dir().join("habit_tracker");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join("habits.db"))
}

/// Load variables from a .env file without overriding ones already set
/// 
/// With no explicit path the file is searched for from the current
/// directory upwards.
fn load_dotenv(path: Option<&Path>) -> Result<PathBuf, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}

/// Command line arguments for the Habit Tracker API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, env = "DATABASE_PATH")]
    database: Option<PathBuf>,
    
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,
    
    /// Directory of static files to serve under /static
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,
    
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
    
    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so the env fallbacks on Args can see its values
    let dotenv_result = load_dotenv(None);
    let args = Args::parse();
    
    // Set up logging based on command line flags; RUST_LOG wins when set
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };
    
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("habit_tracker_api={},tower_http={}", log_level, log_level))
    });
    
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {
            warn!("No .env file found, using system environment variables")
        }
        Err(e) => warn!("Could not load .env file: {}", e),
    }
    
    info!("Starting Habit Tracker API server");
    
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };
    
    info!("Using database at: {}", db_path.display());
    
    let mut server = HabitTrackerServer::new(db_path).await?;
    if let Some(dir) = args.static_dir {
        info!("Serving static files from: {}", dir.display());
        server = server.with_static_dir(dir);
    }
    
    server.run(SocketAddr::new(args.host, args.port)).await?;
    
    info!("Habit Tracker API server shutdown complete");
    Ok(())
}
