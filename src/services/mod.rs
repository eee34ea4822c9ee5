//! Service layer
//!
//! Services own the business logic between the GraphQL resolvers and the
//! repositories.

pub mod auth;

pub use auth::{
    AccessTokenClaims, AuthConfig, AuthError, AuthService, LoginResult, SignupInput,
    jwt_secret_from_env,
};
