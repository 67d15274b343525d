use async_trait::async_trait;

use crate::directory::errors::DirectoryError;
use crate::directory::models::DirectoryEntry;
use crate::directory::models::DirectoryListing;
use crate::directory::models::DirectoryQuery;

/// Port for the public directory operations exposed over HTTP.
#[async_trait]
pub trait DirectoryServicePort: Send + Sync + 'static {
    /// Fetch entries for a category and apply the caller's limit.
    ///
    /// # Errors
    /// * `DirectoryError` - Upstream call failed
    async fn list_entries(&self, query: DirectoryQuery) -> Result<DirectoryListing, DirectoryError>;
}

/// Client for the third-party directory API.
#[async_trait]
pub trait DirectoryClient: Send + Sync + 'static {
    /// Fetch all entries upstream holds for `category` (every entry when `None`).
    ///
    /// # Errors
    /// * `RequestFailed` - Network error or timeout
    /// * `UnexpectedStatus` - Upstream answered with a non-success status
    /// * `InvalidResponse` - Body was not the expected JSON shape
    async fn fetch_entries(
        &self,
        category: Option<String>,
    ) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}
