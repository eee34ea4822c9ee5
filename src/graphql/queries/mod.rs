pub mod comments;
pub mod job_postings;
pub mod posts;
pub mod users;

pub use comments::CommentQueries;
pub use job_postings::JobPostingQueries;
pub use posts::PostQueries;
pub use users::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::pagination::page_bounds;
    pub(crate) use crate::graphql::types::*;
}
