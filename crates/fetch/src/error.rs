//! Retrieval Error Types
//!
//! Failures are split by what the retry policy should do with them: transient
//! network failures are retried, everything else surfaces immediately.

use derive_more::{Display, Error};

/// A retrieval error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transient network failure
    #[display("network error: {_0}")]
    Network(#[error(not(source))] NetworkFailure),
    /// Upstream answered with a non-2xx status
    #[display("unexpected HTTP status {_0}")]
    HttpStatus(#[error(not(source))] u16),
    /// Upstream answered 2xx with a body that could not be decoded
    #[display("invalid response body")]
    InvalidResponse,
    /// The request URL could not be built
    #[display("invalid request")]
    InvalidRequest,
    /// Any other HTTP client failure (TLS setup, redirect loop, ...)
    #[display("transport error")]
    Transport,
    /// The bootstrap request did not hand out a session credential
    #[display("no session credential in bootstrap response")]
    Session,
}

/// Transient network failures, all of them retryable.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFailure {
    #[display("DNS resolution failed")]
    Dns,
    #[display("request timed out")]
    Timeout,
    #[display("connection reset")]
    ConnectionReset,
    #[display("connection refused")]
    ConnectionRefused,
    #[display("fetch failed")]
    FetchFailed,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status code, if upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for statuses that mean the session credential was
    /// rejected (or rate limited) rather than the page being missing.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::HttpStatus(401 | 403 | 429))
    }
}
