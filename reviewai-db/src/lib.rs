//! Database layer for ReviewAI
//!
//! Provides append-only persistence for completed review records. Writes are
//! best-effort from the orchestrator's perspective: a failed insert is logged
//! by the caller and never affects the HTTP response.

pub mod error;
pub mod repos;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use error::{Error, Result};
pub use repos::reviews::{ReviewRecord, ReviewsRepo};

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection from a file path
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get the default database path (~/.cache/reviewai/reviewai.db)
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| Error::Io("Could not determine cache directory".to_string()))?;
        Ok(cache_dir.join("reviewai").join("reviewai.db"))
    }

    /// Create a database connection at the default path
    pub async fn open_default() -> Result<Self> {
        Self::new(Self::default_path()?).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the reviews repository
    pub fn reviews(&self) -> ReviewsRepo {
        ReviewsRepo::new(self.pool.clone())
    }
}
