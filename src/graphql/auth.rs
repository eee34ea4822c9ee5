//! GraphQL authentication context
//!
//! Provides JWT token verification and the request-scoped user context for
//! GraphQL operations. The authenticated user is injected into the request
//! data by the HTTP handler and reached through [`AuthExt`]; it is never
//! ambient state.

use async_graphql::{Context, ErrorExtensions, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::services::auth::{AccessTokenClaims, jwt_secret_from_env};

/// User context extracted from JWT, available in GraphQL resolvers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Verify a JWT token and extract user info
pub fn verify_token(token: &str) -> Result<AuthUser> {
    let jwt_secret = jwt_secret_from_env();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;

    let token_data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.trim().as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        async_graphql::Error::new(format!("Invalid token: {}", e))
            .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
    })?;

    Ok(AuthUser {
        user_id: token_data.claims.sub,
        username: token_data.claims.username,
        email: token_data.claims.email,
    })
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present, or None
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(|| {
            async_graphql::Error::new("Authentication required")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        })
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, UserRecord};
    use crate::services::{AuthConfig, AuthService};

    fn sample_user() -> UserRecord {
        UserRecord {
            id: "user-1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            resume_id: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_and_verify_roundtrip() {
        let db = Database::connect_in_memory().await.unwrap();
        // Default config uses the same env fallback secret as verify_token
        let auth = AuthService::new(db, AuthConfig::default());

        let token = auth.sign_token(&sample_user()).unwrap();
        let verified = verify_token(&token).unwrap();

        assert_eq!(verified.user_id, "user-1");
        assert_eq!(verified.username, "ada");
        assert_eq!(verified.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        assert!(verify_token("not-a-token").is_err());
    }
}
