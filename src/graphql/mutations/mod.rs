pub mod auth;
pub mod resumes;

pub use auth::AuthMutations;
pub use resumes::ResumeMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, InputObject, Object, Result, SimpleObject};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
}
