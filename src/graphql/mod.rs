//! GraphQL API
//!
//! This module provides the GraphQL API using async-graphql. It is the single
//! API surface for the TalentNet backend; queries and mutations live in
//! domain-specific modules merged into the root objects in `schema.rs`.

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod pagination;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthUser, verify_token};
pub use schema::{TalentNetSchema, build_schema};
