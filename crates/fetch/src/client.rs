use crate::cache::TtlCache;
use crate::config::ClientConfig;
use crate::envelope::ListingEnvelope;
use crate::error::{ErrorKind, Result};
use crate::filters::ComicFilters;
use crate::retry::RetryPolicy;
use crate::session::SessionStore;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use exn::{OptionExt, ResultExt};
use std::collections::HashMap;
use std::sync::Arc;
use time::UtcDateTime;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

const LISTING_PATH: &str = "/comic/get_comics";

/// Raw detail page as fetched (or served from cache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub html: String,
    /// Final URL after redirects
    pub url: String,
}

/// Retrieval client for listing and detail pages.
///
/// Detail pages are cached for [`ClientConfig::detail_cache_ttl`] under
/// `id:slug[:variant]` and fetched through the [`RetryPolicy`]. Listing
/// requests are bounded by the same timeout but are never retried or cached.
///
/// With [`SessionConfig::enabled`](crate::config::SessionConfig::enabled),
/// detail requests also carry a session cookie bootstrapped from the site
/// root. When upstream rejects it (401, 403 or 429) the cookie is dropped and
/// exactly one more attempt is made with a fresh one.
///
/// Concurrent requests for the same detail page share one fetch.
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport + Send + Sync>,
    policy: RetryPolicy,
    details: TtlCache<String, DetailPage>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    session: Option<SessionStore>,
}
impl Client {
    /// Builds a client talking HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        let session = config.session.enabled.then(|| SessionStore::new(config.session.ttl()));
        Self {
            policy: RetryPolicy::from_config(&config),
            details: TtlCache::new(config.detail_cache_ttl()),
            in_flight: Mutex::new(HashMap::new()),
            transport,
            session,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cache key of a detail page: `id:slug`, or `id:slug:variant`.
    pub fn cache_key(id: u64, slug: &str, variant: Option<u64>) -> String {
        match variant {
            Some(variant) => format!("{id}:{slug}:{variant}"),
            None => format!("{id}:{slug}"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// `<base>/comic/<id>/<slug>`, with the slug escaped as one path segment.
    fn detail_url(&self, id: u64, slug: &str) -> Result<String> {
        let mut url = Url::parse(&self.config.base_url).or_raise(|| ErrorKind::InvalidRequest)?;
        url.path_segments_mut()
            .ok()
            .ok_or_raise(|| ErrorKind::InvalidRequest)?
            .pop_if_empty()
            .extend(["comic", id.to_string().as_str(), slug]);
        Ok(url.into())
    }

    /// Fetches the listing envelope for `filters` merged over the defaults.
    #[instrument(skip(self, filters))]
    pub async fn comics(&self, filters: &ComicFilters) -> Result<ListingEnvelope> {
        let today = UtcDateTime::now().date();
        let request = TransportRequest::new(self.url(LISTING_PATH)).with_query(filters.query(today));
        let response = self.policy.attempt(self.transport.get(request)).await?;
        let response = ensure_success(response)?;
        let envelope = ListingEnvelope::from_json(&response.body)?;
        tracing::debug!(count = ?envelope.count, list_size = envelope.list.len(), "fetched listing");
        Ok(envelope)
    }

    /// Fetches a detail page, serving it from cache while fresh.
    #[instrument(skip(self))]
    pub async fn comic_detail(&self, id: u64, slug: &str, variant: Option<u64>) -> Result<DetailPage> {
        let key = Self::cache_key(id, slug, variant);
        if let Some(page) = self.details.get(&key).await {
            tracing::debug!(key, "detail cache hit");
            return Ok(page);
        }
        let flight = self.join_flight(&key).await;
        let result = {
            let _guard = flight.lock().await;
            self.fill(&key, id, slug, variant).await
        };
        self.leave_flight(&key, flight).await;
        result
    }

    /// Fetches and caches a detail page once this task owns its key.
    async fn fill(&self, key: &str, id: u64, slug: &str, variant: Option<u64>) -> Result<DetailPage> {
        if let Some(page) = self.details.get(&key.to_string()).await {
            tracing::debug!(key, "detail page fetched by a concurrent request");
            return Ok(page);
        }
        tracing::debug!(key, "detail cache miss");
        let page = match &self.session {
            None => {
                self.policy
                    .run(move |_| self.fetch_detail(id, slug, variant, None))
                    .await?
            },
            Some(session) => self.fetch_with_session(session, id, slug, variant).await?,
        };
        self.details.insert(key.to_string(), page.clone()).await;
        Ok(page)
    }

    async fn join_flight(&self, key: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.entry(key.to_string()).or_default().clone()
    }

    /// Forgets the key lock once no other task holds or awaits it.
    async fn leave_flight(&self, key: &str, flight: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // One reference in the map, one here.
        if Arc::strong_count(&flight) <= 2 {
            in_flight.remove(key);
        }
    }

    async fn fetch_with_session(
        &self,
        session: &SessionStore,
        id: u64,
        slug: &str,
        variant: Option<u64>,
    ) -> Result<DetailPage> {
        let transport = self.transport.as_ref();
        let base_url = self.config.base_url.as_str();
        let cookie = Some(session.credential(transport, &self.policy, base_url).await?);
        let result = self
            .policy
            .run(move |_| self.fetch_detail(id, slug, variant, cookie.clone()))
            .await;
        match result {
            Err(err) if err.is_blocked() => {
                tracing::info!(status = ?err.status(), "session credential rejected; retrying with a fresh one");
                session.invalidate().await;
                let cookie = session.credential(transport, &self.policy, base_url).await?;
                self.policy.attempt(self.fetch_detail(id, slug, variant, Some(cookie))).await
            },
            other => other,
        }
    }

    async fn fetch_detail(&self, id: u64, slug: &str, variant: Option<u64>, cookie: Option<String>) -> Result<DetailPage> {
        let query = variant
            .map(|variant| vec![("variant".to_string(), variant.to_string())])
            .unwrap_or_default();
        let request = TransportRequest::new(self.detail_url(id, slug)?)
            .with_query(query)
            .with_cookie(cookie);
        let response = ensure_success(self.transport.get(request).await?)?;
        Ok(DetailPage {
            html: response.body,
            url: response.url,
        })
    }

    /// Drops every cached detail page.
    pub async fn clear_cache(&self) {
        self.details.clear().await;
    }

    /// Number of detail pages currently served from cache.
    pub async fn cached_details(&self) -> usize {
        self.details.purge_expired().await;
        self.details.len().await
    }

    /// Drops the session credential, if sessions are enabled.
    pub async fn invalidate_session(&self) {
        if let Some(session) = &self.session {
            session.invalidate().await;
        }
    }
}

fn ensure_success(response: TransportResponse) -> Result<TransportResponse> {
    if !response.is_success() {
        exn::bail!(ErrorKind::HttpStatus(response.status));
    }
    Ok(response)
}
