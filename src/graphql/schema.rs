//! GraphQL schema definition
//!
//! Queries and mutations are split into domain modules and merged here into
//! the root objects.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::mutations::{AuthMutations, ResumeMutations};
use super::queries::{CommentQueries, JobPostingQueries, PostQueries, UserQueries};

/// The GraphQL schema type
pub type TalentNetSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    UserQueries,
    PostQueries,
    CommentQueries,
    JobPostingQueries,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, ResumeMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database) -> TalentNetSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .finish()
}
