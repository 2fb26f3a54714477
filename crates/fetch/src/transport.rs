//! The HTTP seam the retrieval client talks through.
//!
//! [`Transport`] performs exactly one GET and reports what came back. It does
//! not retry, cache or judge the status code; that is the client's job.

use crate::config::ClientConfig;
use crate::error::{ErrorKind, NetworkFailure, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::header::{COOKIE, SET_COOKIE};
use std::error::Error as StdError;
use std::io::ErrorKind as IoErrorKind;

/// A single outbound GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportRequest {
    /// Absolute URL, without the query string
    pub url: String,
    /// Query pairs, appended in order (keys may repeat)
    pub query: Vec<(String, String)>,
    /// Value for the `Cookie` header
    pub cookie: Option<String>,
}
impl TransportRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }
}

/// What came back, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    pub body: String,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}
impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs outbound requests.
///
/// Implementations return `Err` only when no response was received at all;
/// non-2xx statuses are still `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}
impl ReqwestTransport {
    /// The per-attempt timeout is enforced by the retry policy, not here, so
    /// that expiry is classified the same way for every transport.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .or_raise(|| ErrorKind::Transport)?;
        Ok(Self { http })
    }

    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(level = "debug", skip(self, request), fields(url = %request.url, status))]
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = url::Url::parse(&request.url).or_raise(|| ErrorKind::InvalidRequest)?;
        let mut builder = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,application/json;q=0.9");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder.send().await;
        let kind = response.as_ref().err().map(classify).unwrap_or(ErrorKind::Transport);
        let response = response.or_raise(|| kind)?;

        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);
        let url = response.url().to_string();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.text().await;
        let kind = body.as_ref().err().map(classify).unwrap_or(ErrorKind::Transport);
        let body = body.or_raise(|| kind)?;

        Ok(TransportResponse {
            status,
            url,
            body,
            set_cookies,
        })
    }
}

/// Maps a client error onto the retry taxonomy by walking its source chain.
fn classify(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        return ErrorKind::Network(NetworkFailure::Timeout);
    }
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            match io.kind() {
                IoErrorKind::TimedOut => return ErrorKind::Network(NetworkFailure::Timeout),
                IoErrorKind::ConnectionRefused => return ErrorKind::Network(NetworkFailure::ConnectionRefused),
                IoErrorKind::ConnectionReset | IoErrorKind::ConnectionAborted | IoErrorKind::BrokenPipe => {
                    return ErrorKind::Network(NetworkFailure::ConnectionReset);
                },
                _ => {},
            }
        }
        let message = cause.to_string().to_lowercase();
        if message.contains("dns") || message.contains("failed to lookup address") {
            return ErrorKind::Network(NetworkFailure::Dns);
        }
        source = cause.source();
    }
    if err.is_connect() || err.is_request() || err.is_body() {
        ErrorKind::Network(NetworkFailure::FetchFailed)
    } else {
        ErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = TransportRequest::new("https://example.com/comic/1/x")
            .with_query(vec![("variant".to_string(), "2".to_string())])
            .with_cookie(Some("ci_session=abc".to_string()));
        assert_eq!(request.url, "https://example.com/comic/1/x");
        assert_eq!(request.query.len(), 1);
        assert_eq!(request.cookie.as_deref(), Some("ci_session=abc"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_retryable() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        // Port 9 (discard) on loopback is closed on any sane test machine.
        let err = transport
            .get(TransportRequest::new("http://127.0.0.1:9/"))
            .await
            .unwrap_err();
        assert!(err.is_retryable(), "{err:?}");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let err = transport.get(TransportRequest::new("not a url")).await.unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidRequest);
    }
}
