//! GraphQL type definitions
//!
//! These types mirror the persisted records but are decorated with
//! async-graphql attributes. Relationship fields (a user's posts, a post's
//! likes, ...) are resolved on demand from the database, so expansion depth
//! is whatever the client query asks for.

use async_graphql::{ComplexObject, Context, Result, SimpleObject};

use crate::db::Database;
use crate::define_page;
use crate::graphql::helpers::{
    comment_record_to_graphql, job_posting_record_to_graphql, load_users_by_ids,
    post_record_to_graphql, resume_record_to_graphql,
};

// ============================================================================
// User
// ============================================================================

/// A member of the network
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Stored bcrypt hash, never the plaintext
    pub password: String,
    pub created_at: String,
    #[graphql(skip)]
    pub resume_id: Option<String>,
}

#[ComplexObject]
impl User {
    /// Posts authored by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db
            .posts()
            .list_by_author(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(records.into_iter().map(post_record_to_graphql).collect())
    }

    /// Comments authored by this user
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db
            .comments()
            .list_by_author(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(records.into_iter().map(comment_record_to_graphql).collect())
    }

    /// Job postings authored by this user
    async fn job_postings(&self, ctx: &Context<'_>) -> Result<Vec<JobPosting>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db
            .job_postings()
            .list_by_author(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(records
            .into_iter()
            .map(job_posting_record_to_graphql)
            .collect())
    }

    /// The user's current resume, if one has been submitted
    async fn resume(&self, ctx: &Context<'_>) -> Result<Option<Resume>> {
        let Some(resume_id) = &self.resume_id else {
            return Ok(None);
        };
        let db = ctx.data_unchecked::<Database>();
        let record = db
            .resumes()
            .get_by_id(resume_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(record.map(resume_record_to_graphql))
    }
}

// ============================================================================
// Post
// ============================================================================

/// A feed post
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Username of the author
    pub username: String,
    pub created_at: String,
    #[graphql(skip)]
    pub like_ids: Vec<String>,
    #[graphql(skip)]
    pub dislike_ids: Vec<String>,
}

#[ComplexObject]
impl Post {
    /// Users who liked this post
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        load_users_by_ids(ctx, &self.like_ids).await
    }

    /// Users who disliked this post
    async fn dislikes(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        load_users_by_ids(ctx, &self.dislike_ids).await
    }

    /// Comments under this post
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db
            .comments()
            .list_by_post(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(records.into_iter().map(comment_record_to_graphql).collect())
    }

    async fn comment_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let db = ctx.data_unchecked::<Database>();
        db.comments()
            .count_by_post(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn likes_count(&self) -> i64 {
        self.like_ids.len() as i64
    }

    async fn dislikes_count(&self) -> i64 {
        self.dislike_ids.len() as i64
    }
}

// ============================================================================
// Comment
// ============================================================================

/// A comment under a post or job posting
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Comment {
    pub id: String,
    /// The comment text
    pub comment: String,
    /// Username of the author
    pub author: String,
    pub created_at: String,
    #[graphql(skip)]
    pub like_ids: Vec<String>,
    #[graphql(skip)]
    pub dislike_ids: Vec<String>,
}

#[ComplexObject]
impl Comment {
    /// Users who liked this comment
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        load_users_by_ids(ctx, &self.like_ids).await
    }

    /// Users who disliked this comment
    async fn dislikes(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        load_users_by_ids(ctx, &self.dislike_ids).await
    }
}

// ============================================================================
// Job Posting
// ============================================================================

/// An open position advertised on the network
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Username of the author
    pub username: String,
    /// Keyword terms attached to the posting
    pub keywords: Vec<String>,
    pub created_at: String,
}

#[ComplexObject]
impl JobPosting {
    /// Comments under this posting
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db
            .comments()
            .list_by_job_posting(&self.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(records.into_iter().map(comment_record_to_graphql).collect())
    }
}

// ============================================================================
// Resume
// ============================================================================

/// One previous job entry on a resume
#[derive(Debug, Clone, SimpleObject)]
pub struct PreviousJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub length: Option<String>,
    pub responsibilities: Option<String>,
}

/// A submitted resume
#[derive(Debug, Clone, SimpleObject)]
pub struct Resume {
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
    /// Up to three previous jobs
    pub previous_jobs: Vec<PreviousJob>,
    pub created_at: String,
}

// ============================================================================
// Pages
// ============================================================================

define_page!(UserPage, User);
define_page!(PostPage, Post);
define_page!(CommentPage, Comment);
define_page!(JobPostingPage, JobPosting);
