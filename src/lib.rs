//! TalentNet backend - GraphQL API for a careers network
//!
//! Users, posts, comments, job postings, and resumes over SQLite, with
//! password-based authentication issuing signed JWTs. All operations are
//! exposed via GraphQL at /graphql.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

use crate::config::Config;
use crate::db::Database;
use crate::graphql::TalentNetSchema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: TalentNetSchema,
}
