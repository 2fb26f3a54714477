//! Session credential bootstrapped from the site root.

use crate::cache::TtlCache;
use crate::error::{ErrorKind, Result};
use crate::retry::RetryPolicy;
use crate::transport::{Transport, TransportRequest};
use exn::OptionExt;
use std::time::Duration;
use tokio::sync::Mutex;

/// Caches the `Cookie` value handed out by a bootstrap request to `/`.
///
/// The credential expires after its own TTL, independently of the detail
/// page cache, and can be dropped early with [`invalidate`](Self::invalidate)
/// when upstream starts rejecting it.
///
/// Concurrent callers share a single bootstrap request.
#[derive(Debug)]
pub struct SessionStore {
    credential: TtlCache<(), String>,
    bootstrapping: Mutex<()>,
}
impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            credential: TtlCache::new(ttl),
            bootstrapping: Mutex::new(()),
        }
    }

    /// Returns the cached credential, bootstrapping a new one if there is
    /// none (or it expired).
    pub async fn credential(&self, transport: &dyn Transport, policy: &RetryPolicy, base_url: &str) -> Result<String> {
        if let Some(credential) = self.credential.get(&()).await {
            tracing::debug!("session credential cache hit");
            return Ok(credential);
        }
        let _bootstrapping = self.bootstrapping.lock().await;
        if let Some(credential) = self.credential.get(&()).await {
            tracing::debug!("session credential bootstrapped by a concurrent request");
            return Ok(credential);
        }
        let credential = bootstrap(transport, policy, base_url).await?;
        self.credential.insert((), credential.clone()).await;
        Ok(credential)
    }

    pub async fn invalidate(&self) {
        if self.credential.remove(&()).await.is_some() {
            tracing::info!("session credential invalidated");
        }
    }

    pub async fn is_active(&self) -> bool {
        self.credential.get(&()).await.is_some()
    }
}

#[tracing::instrument(level = "debug", skip(transport, policy))]
async fn bootstrap(transport: &dyn Transport, policy: &RetryPolicy, base_url: &str) -> Result<String> {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    let response = policy.attempt(transport.get(TransportRequest::new(url))).await?;
    if !response.is_success() {
        exn::bail!(ErrorKind::HttpStatus(response.status));
    }
    credential_from(&response.set_cookies).ok_or_raise(|| ErrorKind::Session)
}

/// Joins the `name=value` part of every `Set-Cookie` value with `"; "`,
/// dropping attributes such as `Path` or `Expires`.
pub fn credential_from(set_cookies: &[String]) -> Option<String> {
    let pairs: Vec<_> = set_cookies
        .iter()
        .filter_map(|header| header.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.split_once('=').is_some_and(|(name, _)| !name.trim().is_empty()))
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("; "))
}
