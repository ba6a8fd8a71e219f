use crate::api::types::ListQuery;
use crate::models::PropertyPage;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for property listing sources.
/// The HTTP client implements this; tests substitute an in-memory one.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch one page of properties matching the query.
    async fn fetch_page(&self, query: &ListQuery) -> Result<PropertyPage>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
