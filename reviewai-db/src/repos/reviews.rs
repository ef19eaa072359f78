//! Repository for persisted review records
//!
//! Review records are append-only: the orchestrator inserts one row per
//! completed review and never updates or deletes it. The read helpers exist
//! for tooling and tests; no HTTP surface reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{Error, Result};

/// A persisted review: the submitted code plus the serialized result
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewRecord {
    /// Unique identifier (None until inserted)
    pub id: Option<i64>,

    /// The submitted source code
    pub code: String,

    /// Language of the submitted code
    pub language: String,

    /// The normalized review result serialized as JSON
    pub results_json: String,

    /// Health score copied out of the result for querying
    pub health_score: i64,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl ReviewRecord {
    /// Create a new record from a completed review
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        results_json: impl Into<String>,
        health_score: i64,
    ) -> Self {
        Self {
            id: None,
            code: code.into(),
            language: language.into(),
            results_json: results_json.into(),
            health_score,
            created_at: Utc::now(),
        }
    }

    /// Parse the serialized result back into a structured type
    pub fn parse_results<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.results_json)
    }
}

/// Repository for managing review records
#[derive(Clone)]
pub struct ReviewsRepo {
    pool: SqlitePool,
}

impl ReviewsRepo {
    /// Create a new repository over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new review record, returning its id
    pub async fn insert(&self, record: &ReviewRecord) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO code_reviews (code, language, results_json, health_score, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.code)
        .bind(&record.language)
        .bind(&record.results_json)
        .bind(record.health_score)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Find a review record by id
    pub async fn find_by_id(&self, id: i64) -> Result<ReviewRecord> {
        sqlx::query_as::<_, ReviewRecord>(
            "SELECT id, code, language, results_json, health_score, created_at
             FROM code_reviews
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Review record with id {} not found", id)))
    }

    /// Find the most recent review records
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<ReviewRecord>> {
        let records = sqlx::query_as::<_, ReviewRecord>(
            "SELECT id, code, language, results_json, health_score, created_at
             FROM code_reviews
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Count all review records
    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM code_reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("test.db")).await.unwrap();
        (temp_dir, db)
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let (_guard, db) = setup().await;
        let repo = db.reviews();

        let record = ReviewRecord::new("fn main() {}", "rust", r#"{"healthScore":90}"#, 90);
        let id = repo.insert(&record).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.code, "fn main() {}");
        assert_eq!(found.language, "rust");
        assert_eq!(found.health_score, 90);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let (_guard, db) = setup().await;
        let repo = db.reviews();

        let result = repo.find_by_id(12345).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_recent_ordering() {
        let (_guard, db) = setup().await;
        let repo = db.reviews();

        for score in [10, 20, 30] {
            let record = ReviewRecord::new("code", "rust", "{}", score);
            repo.insert(&record).await.unwrap();
        }

        let recent = repo.find_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        // Most recent insert first
        assert_eq!(recent[0].health_score, 30);
        assert_eq!(recent[1].health_score, 20);
    }

    #[tokio::test]
    async fn test_count() {
        let (_guard, db) = setup().await;
        let repo = db.reviews();

        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert(&ReviewRecord::new("a", "rust", "{}", 50))
            .await
            .unwrap();
        repo.insert(&ReviewRecord::new("b", "rust", "{}", 60))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_parse_results_roundtrip() {
        let record = ReviewRecord::new("code", "go", r#"{"healthScore": 77}"#, 77);
        let parsed: serde_json::Value = record.parse_results().unwrap();
        assert_eq!(parsed["healthScore"], 77);
    }
}
