//! Job postings repository
//!
//! Keyword terms are a JSON array of strings on the posting row.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPostingRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub username: String,
    pub author_id: String,
    pub keywords: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateJobPosting {
    pub title: String,
    pub body: String,
    pub username: String,
    pub author_id: String,
    pub keywords: Vec<String>,
}

type JobPostingRow = (String, String, String, String, String, String, String);

const JOB_POSTING_COLUMNS: &str = "id, title, body, username, author_id, keywords, created_at";

fn row_to_record(r: JobPostingRow) -> JobPostingRecord {
    JobPostingRecord {
        id: r.0,
        title: r.1,
        body: r.2,
        username: r.3,
        author_id: r.4,
        keywords: json_to_vec(&r.5),
        created_at: r.6,
    }
}

// ============================================================================
// Repository
// ============================================================================

pub struct JobPostingsRepository {
    pool: SqlitePool,
}

impl JobPostingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new job posting
    pub async fn create(&self, posting: CreateJobPosting) -> Result<JobPostingRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO job_postings (id, title, body, username, author_id, keywords, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&posting.title)
        .bind(&posting.body)
        .bind(&posting.username)
        .bind(&posting.author_id)
        .bind(vec_to_json(&posting.keywords))
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create job posting"))
    }

    /// Get job posting by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<JobPostingRecord>> {
        let row = sqlx::query_as::<_, JobPostingRow>(&format!(
            "SELECT {} FROM job_postings WHERE id = ?",
            JOB_POSTING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// List job postings ordered by creation time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<JobPostingRecord>> {
        let rows = sqlx::query_as::<_, JobPostingRow>(&format!(
            "SELECT {} FROM job_postings ORDER BY created_at LIMIT ? OFFSET ?",
            JOB_POSTING_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Count job postings
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM job_postings")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// List job postings by author, oldest first
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<JobPostingRecord>> {
        let rows = sqlx::query_as::<_, JobPostingRow>(&format!(
            "SELECT {} FROM job_postings WHERE author_id = ? ORDER BY created_at",
            JOB_POSTING_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_keywords_roundtrip() {
        let db = Database::connect_in_memory().await.unwrap();
        let postings = db.job_postings();

        let created = postings
            .create(CreateJobPosting {
                title: "Backend engineer".to_string(),
                body: "Build APIs".to_string(),
                username: "recruiter".to_string(),
                author_id: "r-id".to_string(),
                keywords: vec!["rust".to_string(), "graphql".to_string()],
            })
            .await
            .unwrap();

        let fetched = postings.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.keywords, vec!["rust", "graphql"]);
        assert_eq!(postings.count().await.unwrap(), 1);
    }
}
