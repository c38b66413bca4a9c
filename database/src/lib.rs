use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub mod error;
pub mod init;
pub mod schema;

pub use error::{is_foreign_key_violation, is_unique_violation, DatabaseError, Result};

// Re-export initialization functions for convenience
pub use init::{initialize_database, DatabaseConfig};

/// Database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the SQLite file at `database_path`.
    pub async fn new(database_path: &str) -> Result<Self> {
        Self::with_max_connections(database_path, init::DEFAULT_MAX_CONNECTIONS).await
    }

    pub async fn with_max_connections(database_path: &str, max_connections: u32) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Connecting to database at: {}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        debug!("Database connection established");

        Ok(Self { pool })
    }

    /// A private in-memory database with the schema already applied.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Get a clone of the connection pool
    pub fn get_pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    /// Create the users and jobs tables and their indexes. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        for statement in schema::STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        }
        info!("Database migrations completed");
        Ok(())
    }

    /// Check if a table exists
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let query = r#"
            SELECT COUNT(*) as count
            FROM sqlite_master
            WHERE type='table' AND name=?
        "#;

        let result: (i32,) = sqlx::query_as(query)
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    /// Round-trip a trivial query to prove the pool can serve requests.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
