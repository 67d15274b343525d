use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::errors::DirectoryError;
use crate::directory::models::DirectoryListing;
use crate::directory::models::DirectoryQuery;
use crate::directory::ports::DirectoryClient;
use crate::directory::ports::DirectoryServicePort;

/// Proxies the upstream directory and reshapes its answer.
pub struct DirectoryService<DC>
where
    DC: DirectoryClient,
{
    client: Arc<DC>,
}

impl<DC> DirectoryService<DC>
where
    DC: DirectoryClient,
{
    pub fn new(client: Arc<DC>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<DC> DirectoryServicePort for DirectoryService<DC>
where
    DC: DirectoryClient,
{
    async fn list_entries(&self, query: DirectoryQuery) -> Result<DirectoryListing, DirectoryError> {
        let entries = self.client.fetch_entries(query.category).await?;
        let upstream_count = entries.len();

        let listing = DirectoryListing::new(entries, query.limit);
        tracing::debug!(
            upstream_count,
            returned_count = listing.count,
            "Directory entries fetched"
        );

        Ok(listing)
    }
}
