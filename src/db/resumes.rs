//! Resumes repository
//!
//! A resume row is owned by the one user whose `resume_id` points at it.
//! Creating a resume never touches older rows; superseded resumes stay in
//! the table as orphans until the reference moves on.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

// ============================================================================
// Records
// ============================================================================

/// One previous job entry on a resume (stored as JSON in the row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviousJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub length: Option<String>,
    pub responsibilities: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
    pub education_type: Option<String>,
    pub education_length: Option<String>,
    pub previous_jobs: Vec<PreviousJob>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateResume {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
    pub education_type: Option<String>,
    pub education_length: Option<String>,
    pub previous_jobs: Vec<PreviousJob>,
}

type ResumeRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

const RESUME_COLUMNS: &str = "id, full_name, email, phone, location, summary, skills, education, education_type, education_length, previous_jobs, created_at";

fn row_to_record(r: ResumeRow) -> ResumeRecord {
    ResumeRecord {
        id: r.0,
        full_name: r.1,
        email: r.2,
        phone: r.3,
        location: r.4,
        summary: r.5,
        skills: r.6,
        education: r.7,
        education_type: r.8,
        education_length: r.9,
        previous_jobs: json_to_vec(&r.10),
        created_at: r.11,
    }
}

// ============================================================================
// Repository
// ============================================================================

pub struct ResumesRepository {
    pool: SqlitePool,
}

impl ResumesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new resume row
    pub async fn create(&self, resume: CreateResume) -> Result<ResumeRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO resumes (id, full_name, email, phone, location, summary, skills,
                                 education, education_type, education_length, previous_jobs, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&resume.full_name)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.location)
        .bind(&resume.summary)
        .bind(&resume.skills)
        .bind(&resume.education)
        .bind(&resume.education_type)
        .bind(&resume.education_length)
        .bind(vec_to_json(&resume.previous_jobs))
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create resume"))
    }

    /// Get resume by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<ResumeRecord>> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {} FROM resumes WHERE id = ?",
            RESUME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// Count resume rows (orphans included)
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM resumes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
