use crate::error::Result;
use crate::fetcher::types::SearchParams;
use crate::models::FetchOutcome;
use async_trait::async_trait;

/// Common trait for all listing fetchers
/// This allows swapping the scraping backend or stubbing it out in tests
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    /// Run one search against the backend
    async fn fetch(&self, params: &SearchParams) -> Result<FetchOutcome>;

    /// Get the name of the backend
    fn source_name(&self) -> &'static str;
}
