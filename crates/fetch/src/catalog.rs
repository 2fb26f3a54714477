use crate::batch::{BatchFailure, DetailRequest};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::filters::ComicFilters;
use longbox_extract::models::{ComicDetails, ComicSummary};
use longbox_extract::{extract_details, extract_listing};
use tracing::instrument;

/// Typed entry point: fetch a page, extract its entities.
///
/// Retrieval can fail; extraction cannot. A page that fetched fine but lost
/// its structure upstream still yields entities, just with default fields.
pub struct Catalog {
    client: Client,
}
impl Catalog {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(Client::new(config)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Releases matching `filters`, merged over the listing defaults.
    #[instrument(skip(self, filters))]
    pub async fn comics(&self, filters: &ComicFilters) -> Result<Vec<ComicSummary>> {
        let envelope = self.client.comics(filters).await?;
        Ok(extract_listing(&envelope.list))
    }

    #[instrument(skip(self))]
    pub async fn comic(&self, id: u64, slug: &str, variant: Option<u64>) -> Result<ComicDetails> {
        let page = self.client.comic_detail(id, slug, variant).await?;
        Ok(extract_details(&page.html))
    }

    /// Fetches and extracts every request, keeping failures in place.
    pub async fn comic_batch(&self, requests: &[DetailRequest]) -> Vec<std::result::Result<ComicDetails, BatchFailure>> {
        self.client
            .comic_details(requests)
            .await
            .into_iter()
            .map(|outcome| outcome.map(|page| extract_details(&page.html)))
            .collect()
    }
}
