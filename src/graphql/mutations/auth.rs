//! GraphQL authentication mutations
//!
//! Signup and login. Neither requires authentication; both return an explicit
//! success/error payload instead of throwing on expected failures, so the
//! client always gets a typed outcome.

use super::prelude::*;
use crate::services::SignupInput;

// ============================================================================
// Input Types
// ============================================================================

/// Input for user signup
#[derive(Debug, InputObject)]
pub struct AddUserInput {
    /// Unique handle shown on posts
    pub username: String,
    /// Email address (login identifier)
    pub email: String,
    /// Password (will be hashed)
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Input for user login
#[derive(Debug, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Output Types
// ============================================================================

/// Result of addUser or login
#[derive(Debug, SimpleObject)]
pub struct AuthPayload {
    /// Whether the operation succeeded
    pub success: bool,
    /// Signed access token (if successful)
    pub token: Option<String>,
    /// The authenticated user (if successful)
    pub user: Option<User>,
    /// Error message (if failed)
    pub error: Option<String>,
}

// ============================================================================
// Mutations
// ============================================================================

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Create a new user account and sign a token for it
    async fn add_user(&self, ctx: &Context<'_>, input: AddUserInput) -> Result<AuthPayload> {
        let db = ctx.data_unchecked::<Database>();
        let auth_service = AuthService::with_env(db.clone());

        let signup_input = SignupInput {
            username: input.username,
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        };

        match auth_service.signup(signup_input).await {
            Ok(result) => {
                tracing::info!(
                    user_id = %result.user.id,
                    username = %result.user.username,
                    "User signed up"
                );
                Ok(AuthPayload {
                    success: true,
                    token: Some(result.token),
                    user: Some(user_record_to_graphql(result.user)),
                    error: None,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Signup failed");
                Ok(AuthPayload {
                    success: false,
                    token: None,
                    user: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// Authenticate with email and password
    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayload> {
        let db = ctx.data_unchecked::<Database>();
        let auth_service = AuthService::with_env(db.clone());

        match auth_service.login(&input.email, &input.password).await {
            Ok(result) => {
                tracing::info!(
                    user_id = %result.user.id,
                    username = %result.user.username,
                    "User logged in"
                );
                Ok(AuthPayload {
                    success: true,
                    token: Some(result.token),
                    user: Some(user_record_to_graphql(result.user)),
                    error: None,
                })
            }
            Err(e) => {
                tracing::warn!(email = %input.email, error = %e, "Login failed");
                Ok(AuthPayload {
                    success: false,
                    token: None,
                    user: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }
}
