use super::prelude::*;

#[derive(Default)]
pub struct JobPostingQueries;

#[Object]
impl JobPostingQueries {
    /// All job postings, ordered by creation time
    async fn job_postings(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<JobPostingPage> {
        let db = ctx.data_unchecked::<Database>();
        let (limit, offset) = page_bounds(limit, offset);

        let total = db
            .job_postings()
            .count()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let records = db
            .job_postings()
            .list(limit, offset)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(JobPostingPage::from_items(
            records
                .into_iter()
                .map(job_posting_record_to_graphql)
                .collect(),
            offset,
            total,
        ))
    }
}
