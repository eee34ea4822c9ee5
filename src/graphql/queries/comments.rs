use super::prelude::*;

#[derive(Default)]
pub struct CommentQueries;

#[Object]
impl CommentQueries {
    /// All comments, ordered by creation time
    async fn comments(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<CommentPage> {
        let db = ctx.data_unchecked::<Database>();
        let (limit, offset) = page_bounds(limit, offset);

        let total = db
            .comments()
            .count()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let records = db
            .comments()
            .list(limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(CommentPage::from_items(
            records.into_iter().map(comment_record_to_graphql).collect(),
            offset,
            total,
        ))
    }
}
