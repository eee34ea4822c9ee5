//! Database schema bootstrap
//!
//! Creates missing tables and indexes at startup. All DDL is idempotent
//! (CREATE ... IF NOT EXISTS); there is no column diffing, so schema changes
//! to existing tables require a database wipe.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// DDL executed in order on startup.
///
/// Reference sets (likes, dislikes, keywords, previous jobs) are JSON arrays
/// in TEXT columns; timestamps are ISO8601 TEXT; ids are UUID strings.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL COLLATE NOCASE UNIQUE,
        email TEXT NOT NULL COLLATE NOCASE UNIQUE,
        password_hash TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        resume_id TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        username TEXT NOT NULL,
        author_id TEXT NOT NULL,
        likes TEXT NOT NULL DEFAULT '[]',
        dislikes TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id TEXT PRIMARY KEY,
        comment TEXT NOT NULL,
        author TEXT NOT NULL,
        author_id TEXT NOT NULL,
        post_id TEXT,
        job_posting_id TEXT,
        likes TEXT NOT NULL DEFAULT '[]',
        dislikes TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS job_postings (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        username TEXT NOT NULL,
        author_id TEXT NOT NULL,
        keywords TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id TEXT PRIMARY KEY,
        full_name TEXT,
        email TEXT,
        phone TEXT,
        location TEXT,
        summary TEXT,
        skills TEXT,
        education TEXT,
        education_type TEXT,
        education_length TEXT,
        previous_jobs TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_posts_author ON posts (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_author ON comments (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_job_posting ON comments (job_posting_id)",
    "CREATE INDEX IF NOT EXISTS idx_job_postings_author ON job_postings (author_id)",
];

/// Bring the database schema up to date
pub async fn sync_schema(pool: &SqlitePool) -> Result<()> {
    for ddl in TABLES {
        debug!(ddl = ddl.trim(), "Applying schema statement");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Check if a table exists in the database
pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}
