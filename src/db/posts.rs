//! Posts repository
//!
//! Like/dislike reference sets are JSON arrays of user ids, updated with
//! single-row read-modify-write (SQLite single-statement atomicity applies
//! to each write, as with any single-document update).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub username: String,
    pub author_id: String,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub username: String,
    pub author_id: String,
}

type PostRow = (String, String, String, String, String, String, String, String);

const POST_COLUMNS: &str = "id, title, body, username, author_id, likes, dislikes, created_at";

fn row_to_record(r: PostRow) -> PostRecord {
    PostRecord {
        id: r.0,
        title: r.1,
        body: r.2,
        username: r.3,
        author_id: r.4,
        likes: json_to_vec(&r.5),
        dislikes: json_to_vec(&r.6),
        created_at: r.7,
    }
}

// ============================================================================
// Repository
// ============================================================================

pub struct PostsRepository {
    pool: SqlitePool,
}

impl PostsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post
    pub async fn create(&self, post: CreatePost) -> Result<PostRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, username, author_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.username)
        .bind(&post.author_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to create post"))
    }

    /// Get post by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<PostRecord>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// List posts ordered by creation time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostRecord>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts ORDER BY created_at LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Count posts
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// List posts by author, oldest first
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<PostRecord>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE author_id = ? ORDER BY created_at",
            POST_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Add a user to the post's like set (idempotent)
    pub async fn add_like(&self, post_id: &str, user_id: &str) -> Result<Option<PostRecord>> {
        self.add_to_set(post_id, user_id, "likes").await
    }

    /// Add a user to the post's dislike set (idempotent)
    pub async fn add_dislike(&self, post_id: &str, user_id: &str) -> Result<Option<PostRecord>> {
        self.add_to_set(post_id, user_id, "dislikes").await
    }

    async fn add_to_set(
        &self,
        post_id: &str,
        user_id: &str,
        column: &str,
    ) -> Result<Option<PostRecord>> {
        let Some(record) = self.get_by_id(post_id).await? else {
            return Ok(None);
        };

        let mut set = match column {
            "likes" => record.likes.clone(),
            _ => record.dislikes.clone(),
        };
        if !set.iter().any(|id| id == user_id) {
            set.push(user_id.to_string());
            sqlx::query(&format!("UPDATE posts SET {} = ? WHERE id = ?", column))
                .bind(vec_to_json(&set))
                .bind(post_id)
                .execute(&self.pool)
                .await?;
        }

        self.get_by_id(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn sample_post() -> CreatePost {
        CreatePost {
            title: "First post".to_string(),
            body: "hello".to_string(),
            username: "author".to_string(),
            author_id: "author-id".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_with_empty_sets() {
        let db = Database::connect_in_memory().await.unwrap();
        let post = db.posts().create(sample_post()).await.unwrap();

        assert!(post.likes.is_empty());
        assert!(post.dislikes.is_empty());
    }

    #[tokio::test]
    async fn test_add_like_is_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        let posts = db.posts();
        let post = posts.create(sample_post()).await.unwrap();

        posts.add_like(&post.id, "u1").await.unwrap();
        posts.add_like(&post.id, "u2").await.unwrap();
        let updated = posts.add_like(&post.id, "u1").await.unwrap().unwrap();

        assert_eq!(updated.likes, vec!["u1".to_string(), "u2".to_string()]);
        assert!(updated.dislikes.is_empty());
    }

    #[tokio::test]
    async fn test_add_like_unknown_post() {
        let db = Database::connect_in_memory().await.unwrap();
        let result = db.posts().add_like("missing", "u1").await.unwrap();
        assert!(result.is_none());
    }
}
