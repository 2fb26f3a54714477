//! Concurrent detail retrieval where one failure never sinks the group.

use crate::client::{Client, DetailPage};
use crate::error::Error;
use derive_more::{Display, Error};
use futures::future::join_all;

/// One detail page to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailRequest {
    pub id: u64,
    pub slug: String,
    pub variant: Option<u64>,
}
impl DetailRequest {
    pub fn new(id: u64, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            variant: None,
        }
    }

    pub fn variant(mut self, variant: u64) -> Self {
        self.variant = Some(variant);
        self
    }
}

/// A request of a batch that failed, with enough context to report it.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("failed to fetch comic {id} ({slug}): {message}")]
pub struct BatchFailure {
    pub id: u64,
    pub slug: String,
    pub variant: Option<u64>,
    /// HTTP status, when upstream answered at all
    pub status: Option<u16>,
    pub message: String,
}
impl BatchFailure {
    pub fn new(request: &DetailRequest, err: &Error) -> Self {
        Self {
            id: request.id,
            slug: request.slug.clone(),
            variant: request.variant,
            status: err.status(),
            message: err.to_string(),
        }
    }
}

pub type BatchOutcome = Result<DetailPage, BatchFailure>;

impl Client {
    /// Fetches every request concurrently. Outcomes come back in input order.
    #[tracing::instrument(skip_all, fields(count = requests.len(), failed))]
    pub async fn comic_details(&self, requests: &[DetailRequest]) -> Vec<BatchOutcome> {
        let outcomes: Vec<_> = join_all(requests.iter().map(|request| async move {
            self.comic_detail(request.id, &request.slug, request.variant)
                .await
                .map_err(|err| BatchFailure::new(request, &err))
        }))
        .await;
        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        tracing::Span::current().record("failed", failed);
        if failed > 0 {
            tracing::warn!(failed, "some detail pages could not be fetched");
        }
        outcomes
    }
}
