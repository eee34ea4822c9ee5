use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// All users, ordered by signup time
    async fn users(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<UserPage> {
        let db = ctx.data_unchecked::<Database>();
        let (limit, offset) = page_bounds(limit, offset);

        let total = db
            .users()
            .count()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let records = db
            .users()
            .list(limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(UserPage::from_items(
            records.into_iter().map(user_record_to_graphql).collect(),
            offset,
            total,
        ))
    }

    /// Look up one user by username
    async fn user(&self, ctx: &Context<'_>, username: String) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();
        let record = db
            .users()
            .get_by_username(&username)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(record.map(user_record_to_graphql))
    }

    /// The currently signed-in user, resolved from the request auth context
    async fn my_user(&self, ctx: &Context<'_>) -> Result<User> {
        let auth = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .users()
            .get_by_id(&auth.user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| async_graphql::Error::new("User no longer exists"))?;

        Ok(user_record_to_graphql(record))
    }
}
