//! Offset pagination for GraphQL list queries
//!
//! Every list query takes optional `limit`/`offset` arguments and returns a
//! page object, so result sizes stay bounded as the store grows.
//!
//! Usage: Use the `define_page!` macro to create type-specific page objects.

/// Page size applied when the client passes no limit
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Hard cap on the page size a client can request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp raw pagination arguments into `(limit, offset)` query bounds
pub fn page_bounds(limit: Option<i32>, offset: Option<i32>) -> (i64, i64) {
    let limit = limit.map(i64::from).unwrap_or(DEFAULT_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE);
    let offset = offset.map(i64::from).unwrap_or(0).max(0);
    (limit, offset)
}

/// Macro to define a GraphQL page type for a specific entity
///
/// Usage:
/// ```ignore
/// define_page!(UserPage, User);
/// ```
#[macro_export]
macro_rules! define_page {
    ($page_name:ident, $node_type:ty) => {
        /// A bounded page of results
        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $page_name {
            /// The items on this page
            pub items: Vec<$node_type>,
            /// Total count of items in the store
            pub total_count: i64,
            /// Whether more items exist past this page
            pub has_more: bool,
        }

        impl $page_name {
            /// Build a page from a fetched slice and the store total
            pub fn from_items(items: Vec<$node_type>, offset: i64, total: i64) -> Self {
                let has_more = (offset + items.len() as i64) < total;
                Self {
                    items,
                    total_count: total,
                    has_more,
                }
            }
        }
    };
}
