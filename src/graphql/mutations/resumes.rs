//! Resume mutation
//!
//! `updateResume` always inserts a new resume row and repoints the caller's
//! reference; it never edits a resume in place. The superseded row is left
//! behind (no cascading delete). Both writes are reported as one explicit
//! success/error outcome.

use super::prelude::*;
use crate::db::{self, CreateResume};

/// Resumes list at most this many previous jobs
const MAX_PREVIOUS_JOBS: usize = 3;

// ============================================================================
// Input Types
// ============================================================================

/// One previous job entry
#[derive(Debug, InputObject)]
pub struct PreviousJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub length: Option<String>,
    pub responsibilities: Option<String>,
}

/// Input for updateResume. All fields are optional free-form text.
#[derive(Debug, InputObject)]
pub struct UpdateResumeInput {
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
    pub previous_jobs: Option<Vec<PreviousJobInput>>,
}

// ============================================================================
// Output Types
// ============================================================================

/// Result of updateResume
#[derive(Debug, SimpleObject)]
pub struct UpdateResumeResult {
    /// Whether both writes (insert resume, repoint user) went through
    pub success: bool,
    /// The newly created resume (if successful)
    pub resume: Option<Resume>,
    /// The calling user with the updated reference (if successful)
    pub user: Option<User>,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl UpdateResumeResult {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            resume: None,
            user: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Mutations
// ============================================================================

#[derive(Default)]
pub struct ResumeMutations;

#[Object]
impl ResumeMutations {
    /// Submit a new resume for the signed-in user.
    ///
    /// Inserts a new resume record and points the user's resume reference at
    /// it. Requires authentication; without it nothing is written and the
    /// payload reports the failure.
    async fn update_resume(
        &self,
        ctx: &Context<'_>,
        input: UpdateResumeInput,
    ) -> Result<UpdateResumeResult> {
        let Some(auth) = ctx.try_auth_user() else {
            return Ok(UpdateResumeResult::failure("Authentication required"));
        };

        let previous_jobs: Vec<db::PreviousJob> = input
            .previous_jobs
            .unwrap_or_default()
            .into_iter()
            .map(|j| db::PreviousJob {
                title: j.title,
                company: j.company,
                length: j.length,
                responsibilities: j.responsibilities,
            })
            .collect();
        if previous_jobs.len() > MAX_PREVIOUS_JOBS {
            return Ok(UpdateResumeResult::failure(format!(
                "A resume lists at most {} previous jobs",
                MAX_PREVIOUS_JOBS
            )));
        }

        let db = ctx.data_unchecked::<Database>();

        let resume = match db
            .resumes()
            .create(CreateResume {
                full_name: input.full_name,
                email: input.email,
                phone: input.phone,
                location: input.location,
                summary: input.summary,
                skills: input.skills,
                education: input.education,
                education_type: input.education_type,
                education_length: input.education_length,
                previous_jobs,
            })
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(user_id = %auth.user_id, error = %e, "Failed to create resume");
                return Ok(UpdateResumeResult::failure(format!(
                    "Failed to create resume: {}",
                    e
                )));
            }
        };

        let user = match db.users().set_resume(&auth.user_id, &resume.id).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                tracing::error!(user_id = %auth.user_id, "Resume created for unknown user");
                return Ok(UpdateResumeResult::failure("User no longer exists"));
            }
            Err(e) => {
                tracing::error!(user_id = %auth.user_id, error = %e, "Failed to update resume reference");
                return Ok(UpdateResumeResult::failure(format!(
                    "Failed to update resume reference: {}",
                    e
                )));
            }
        };

        tracing::info!(
            user_id = %auth.user_id,
            resume_id = %resume.id,
            "Resume updated"
        );

        Ok(UpdateResumeResult {
            success: true,
            resume: Some(resume_record_to_graphql(resume)),
            user: Some(user_record_to_graphql(user)),
            error: None,
        })
    }
}
