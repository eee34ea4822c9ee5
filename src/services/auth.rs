//! Authentication service for user management and JWT handling
//!
//! Provides:
//! - User signup and login
//! - Password hashing with bcrypt
//! - Signed access token issuance

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{CreateUser, Database, UserRecord};

/// Resolve the JWT signing secret, falling back to a development default.
///
/// Shared with token verification so that tokens signed without JWT_SECRET
/// set still verify within the same process.
pub fn jwt_secret_from_env() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string())
}

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims structure for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

// ============================================================================
// Auth Types
// ============================================================================

/// Signup input
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful signup or login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserRecord,
    pub token: String,
}

/// Authentication failure taxonomy.
///
/// "No user found" and "incorrect credentials" are distinct, user-visible
/// failures; everything else is internal.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No user found with this email address")]
    UserNotFound,
    #[error("Incorrect credentials")]
    IncorrectCredentials,
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("Email is already registered")]
    EmailRegistered,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 24 hours)
    pub token_lifetime: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: jwt_secret_from_env(),
            token_lifetime: 24 * 60 * 60,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: jwt_secret_from_env(),
            token_lifetime: std::env::var("TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 60 * 60),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_COST),
        }
    }
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Create with default config from environment
    pub fn with_env(db: Database) -> Self {
        Self::new(db, AuthConfig::from_env())
    }

    // ========================================================================
    // Signup
    // ========================================================================

    /// Create a new user and sign a token for it.
    ///
    /// Duplicate username/email are checked here so the failure surfaces as a
    /// typed error; the UNIQUE indexes backstop the race window.
    pub async fn signup(&self, input: SignupInput) -> Result<LoginResult, AuthError> {
        let users = self.db.users();

        if users.get_by_username(&input.username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if users.get_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailRegistered);
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = users
            .create(CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;

        let token = self.sign_token(&user)?;

        Ok(LoginResult { user, token })
    }

    // ========================================================================
    // Login
    // ========================================================================

    /// Login with email and password.
    ///
    /// Password comparison never runs for an unknown email, so the two
    /// failure modes stay distinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let users = self.db.users();

        let user = match users.get_by_email(email).await? {
            Some(u) => u,
            None => return Err(AuthError::UserNotFound),
        };

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::IncorrectCredentials);
        }

        let token = self.sign_token(&user)?;

        Ok(LoginResult { user, token })
    }

    // ========================================================================
    // Token Issuance
    // ========================================================================

    /// Sign an access token for a user
    pub fn sign_token(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_lifetime);

        let claims = AccessTokenClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| anyhow!("Failed to sign token: {}", e))?;

        Ok(token)
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Hash a password with bcrypt
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(anyhow!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        verify(password, hash)
            .map_err(|e| AuthError::Internal(anyhow!("Failed to verify password: {}", e)))
    }
}
