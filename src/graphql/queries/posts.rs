use super::prelude::*;

#[derive(Default)]
pub struct PostQueries;

#[Object]
impl PostQueries {
    /// All posts, ordered by creation time
    async fn posts(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<PostPage> {
        let db = ctx.data_unchecked::<Database>();
        let (limit, offset) = page_bounds(limit, offset);

        let total = db
            .posts()
            .count()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let records = db
            .posts()
            .list(limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(PostPage::from_items(
            records.into_iter().map(post_record_to_graphql).collect(),
            offset,
            total,
        ))
    }
}
