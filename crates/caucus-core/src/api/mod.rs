//! Remote bill catalog access.
//!
//! - [`locator`]: request URLs with an explicit, sorted query map.
//! - [`transport`]: the blocking GET seam and its `ureq` implementation.
//! - [`client`]: offset pagination, per-object detail fetches, retry/drop.

pub mod client;
pub mod locator;
pub mod transport;

pub use client::{ApiClient, Fetched, Pages, RetrievalStats, RetryPolicy};
pub use locator::ApiLocator;
pub use transport::{HttpTransport, Transport, TransportError};

use crate::error::ErrorCode;

/// Fatal retrieval failures. Transient detail failures never surface here;
/// they are retried and then counted as dropped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("listing request {url} failed: {source}")]
    Listing {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("detail request {url} failed: {source}")]
    Detail {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("unexpected response shape from {url}: {message}")]
    Malformed { url: String, message: String },
}

impl FetchError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Listing { .. } => ErrorCode::ListingRequestFailed,
            Self::Detail { .. } => ErrorCode::DetailRequestFailed,
            Self::Malformed { .. } => ErrorCode::MalformedRecord,
        }
    }
}
