//! Retrieval of comic catalog pages.
//!
//! [`Client`] fetches listing envelopes and detail pages, caching detail pages
//! and retrying transient failures. [`Catalog`] pairs it with the extraction
//! engine to hand back typed entities.

mod batch;
mod cache;
mod catalog;
mod client;
pub mod config;
mod envelope;
pub mod error;
mod filters;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod retry;
mod session;
mod transport;

pub use crate::batch::{BatchFailure, BatchOutcome, DetailRequest};
pub use crate::cache::TtlCache;
pub use crate::catalog::Catalog;
pub use crate::client::{Client, DetailPage};
pub use crate::config::{ClientConfig, SessionConfig};
pub use crate::envelope::{Configurator, ListingEnvelope};
pub use crate::filters::{ComicFilters, DateType, Format, ListKind, Order};
pub use crate::retry::RetryPolicy;
pub use crate::session::{SessionStore, credential_from};
pub use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
