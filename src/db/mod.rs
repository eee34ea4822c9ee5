//! Database connection and repositories
//!
//! Re-exports are provided for convenience, even if not all are used within the crate.

#![allow(unused_imports)]

pub mod comments;
pub mod job_postings;
pub mod posts;
pub mod resumes;
pub mod schema;
pub mod sqlite_helpers;
pub mod users;

use std::str::FromStr;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use comments::{CommentRecord, CommentsRepository, CreateComment};
pub use job_postings::{CreateJobPosting, JobPostingRecord, JobPostingsRepository};
pub use posts::{CreatePost, PostRecord, PostsRepository};
pub use resumes::{CreateResume, PreviousJob, ResumeRecord, ResumesRepository};
pub use schema::sync_schema;
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool, creating the file if missing
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(Self::get_max_connections())
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Open an in-memory database with the schema applied.
    ///
    /// Capped at one connection: each in-memory SQLite connection is its own
    /// database, so a larger pool would hand out empty databases.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.sync_schema().await?;
        Ok(db)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring the schema up to date
    pub async fn sync_schema(&self) -> Result<()> {
        schema::sync_schema(&self.pool).await
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Get a posts repository
    pub fn posts(&self) -> PostsRepository {
        PostsRepository::new(self.pool.clone())
    }

    /// Get a comments repository
    pub fn comments(&self) -> CommentsRepository {
        CommentsRepository::new(self.pool.clone())
    }

    /// Get a job postings repository
    pub fn job_postings(&self) -> JobPostingsRepository {
        JobPostingsRepository::new(self.pool.clone())
    }

    /// Get a resumes repository
    pub fn resumes(&self) -> ResumesRepository {
        ResumesRepository::new(self.pool.clone())
    }
}
