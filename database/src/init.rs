use crate::{Database, DatabaseError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database initialization configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Whether to create tables on initialization
    pub create_tables: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("jobboard.db"),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            create_tables: true,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new database configuration with a specific database path
    pub fn new_with_path(database_path: PathBuf) -> Self {
        Self {
            database_path,
            ..Self::default()
        }
    }

    /// Set a custom database path
    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Set whether to create tables on initialization
    pub fn with_create_tables(mut self, create: bool) -> Self {
        self.create_tables = create;
        self
    }
}

/// Initialize the database with the given configuration
pub async fn initialize_database(config: DatabaseConfig) -> Result<Arc<Database>> {
    info!("Initializing database with configuration");

    // Ensure the data directory exists
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
            info!("Using data directory at: {:?}", parent);
        }
    }

    let db_path_str = config
        .database_path
        .to_str()
        .ok_or_else(|| DatabaseError::Other("Invalid database path".into()))?;

    let db = Database::with_max_connections(db_path_str, config.max_connections).await?;
    info!("Database connection established");

    if config.create_tables {
        db.migrate().await?;
    }

    Ok(Arc::new(db))
}
