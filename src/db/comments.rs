//! Comments repository
//!
//! A comment belongs to at most one parent (a post or a job posting), tracked
//! by nullable reference columns. Like/dislike sets follow the same JSON
//! array idiom as posts.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    pub comment: String,
    pub author: String,
    pub author_id: String,
    pub post_id: Option<String>,
    pub job_posting_id: Option<String>,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub comment: String,
    pub author: String,
    pub author_id: String,
    pub post_id: Option<String>,
    pub job_posting_id: Option<String>,
}

type CommentRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
    String,
);

const COMMENT_COLUMNS: &str =
    "id, comment, author, author_id, post_id, job_posting_id, likes, dislikes, created_at";

fn row_to_record(r: CommentRow) -> CommentRecord {
    CommentRecord {
        id: r.0,
        comment: r.1,
        author: r.2,
        author_id: r.3,
        post_id: r.4,
        job_posting_id: r.5,
        likes: json_to_vec(&r.6),
        dislikes: json_to_vec(&r.7),
        created_at: r.8,
    }
}

// ============================================================================
// Repository
// ============================================================================

pub struct CommentsRepository {
    pool: SqlitePool,
}

impl CommentsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(&self, comment: CreateComment) -> Result<CommentRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO comments (id, comment, author, author_id, post_id, job_posting_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&comment.comment)
        .bind(&comment.author)
        .bind(&comment.author_id)
        .bind(&comment.post_id)
        .bind(&comment.job_posting_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create comment"))
    }

    /// Get comment by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<CommentRecord>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments WHERE id = ?",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// List comments ordered by creation time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments ORDER BY created_at LIMIT ? OFFSET ?",
            COMMENT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Count comments
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// List comments by author, oldest first
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments WHERE author_id = ? ORDER BY created_at",
            COMMENT_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// List comments under a post, oldest first
    pub async fn list_by_post(&self, post_id: &str) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments WHERE post_id = ? ORDER BY created_at",
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Count comments under a post
    pub async fn count_by_post(&self, post_id: &str) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// List comments under a job posting, oldest first
    pub async fn list_by_job_posting(&self, job_posting_id: &str) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments WHERE job_posting_id = ? ORDER BY created_at",
            COMMENT_COLUMNS
        ))
        .bind(job_posting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Add a user to the comment's like set (idempotent)
    pub async fn add_like(&self, comment_id: &str, user_id: &str) -> Result<Option<CommentRecord>> {
        self.add_to_set(comment_id, user_id, "likes").await
    }

    /// Add a user to the comment's dislike set (idempotent)
    pub async fn add_dislike(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> Result<Option<CommentRecord>> {
        self.add_to_set(comment_id, user_id, "dislikes").await
    }

    async fn add_to_set(
        &self,
        comment_id: &str,
        user_id: &str,
        column: &str,
    ) -> Result<Option<CommentRecord>> {
        let Some(record) = self.get_by_id(comment_id).await? else {
            return Ok(None);
        };

        let mut set = match column {
            "likes" => record.likes.clone(),
            _ => record.dislikes.clone(),
        };
        if !set.iter().any(|id| id == user_id) {
            set.push(user_id.to_string());
            sqlx::query(&format!("UPDATE comments SET {} = ? WHERE id = ?", column))
                .bind(vec_to_json(&set))
                .bind(comment_id)
                .execute(&self.pool)
                .await?;
        }

        self.get_by_id(comment_id).await
    }
}
