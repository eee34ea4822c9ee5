// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{Context, Result};

use crate::db::{
    CommentRecord, Database, JobPostingRecord, PostRecord, ResumeRecord, UserRecord,
};
use crate::graphql::types::{Comment, JobPosting, Post, PreviousJob, Resume, User};

/// Convert a UserRecord from the database to a GraphQL User type
pub(crate) fn user_record_to_graphql(r: UserRecord) -> User {
    User {
        id: r.id,
        username: r.username,
        first_name: r.first_name,
        last_name: r.last_name,
        email: r.email,
        password: r.password_hash,
        created_at: r.created_at,
        resume_id: r.resume_id,
    }
}

/// Convert a PostRecord from the database to a GraphQL Post type
pub(crate) fn post_record_to_graphql(r: PostRecord) -> Post {
    Post {
        id: r.id,
        title: r.title,
        body: r.body,
        username: r.username,
        created_at: r.created_at,
        like_ids: r.likes,
        dislike_ids: r.dislikes,
    }
}

/// Convert a CommentRecord from the database to a GraphQL Comment type
pub(crate) fn comment_record_to_graphql(r: CommentRecord) -> Comment {
    Comment {
        id: r.id,
        comment: r.comment,
        author: r.author,
        created_at: r.created_at,
        like_ids: r.likes,
        dislike_ids: r.dislikes,
    }
}

/// Convert a JobPostingRecord from the database to a GraphQL JobPosting type
pub(crate) fn job_posting_record_to_graphql(r: JobPostingRecord) -> JobPosting {
    JobPosting {
        id: r.id,
        title: r.title,
        body: r.body,
        username: r.username,
        keywords: r.keywords,
        created_at: r.created_at,
    }
}

/// Convert a ResumeRecord from the database to a GraphQL Resume type
pub(crate) fn resume_record_to_graphql(r: ResumeRecord) -> Resume {
    Resume {
        id: r.id,
        full_name: r.full_name,
        email: r.email,
        phone: r.phone,
        location: r.location,
        summary: r.summary,
        skills: r.skills,
        education: r.education,
        education_type: r.education_type,
        education_length: r.education_length,
        previous_jobs: r
            .previous_jobs
            .into_iter()
            .map(|j| PreviousJob {
                title: j.title,
                company: j.company,
                length: j.length,
                responsibilities: j.responsibilities,
            })
            .collect(),
        created_at: r.created_at,
    }
}

/// Resolve a set of user ids (a like/dislike set) to GraphQL users
pub(crate) async fn load_users_by_ids(ctx: &Context<'_>, ids: &[String]) -> Result<Vec<User>> {
    let db = ctx.data_unchecked::<Database>();
    let records = db
        .users()
        .get_many_by_ids(ids)
        .await
        .map_err(|e| async_graphql::Error::new(e.to_string()))?;
    Ok(records.into_iter().map(user_record_to_graphql).collect())
}
