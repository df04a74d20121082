//! Offset-paginated retrieval over the bill API.
//!
//! # Protocol
//!
//! The listing endpoint answers with
//!
//! ```text
//! {"meta": {"offset": 0, "limit": 100, "total_count": 5123},
//!  "objects": [{"id": 1, ...}, ...]}
//! ```
//!
//! Listing objects are summaries. Each one is followed by a detail request to
//! `{listing_path}/{id}` which returns the full record.
//!
//! # Iteration
//!
//! [`Pages`] is a lazy iterator: every call to `next()` may block on one or
//! more HTTP requests. Dropping it stops retrieval immediately. Pages are
//! walked by advancing `offset` by the page's reported `limit` until the
//! caller's limit is reached or `offset >= total_count`.
//!
//! # Failure policy
//!
//! - Detail request answered with 5xx, or failing to connect: retried until
//!   [`RetryPolicy::max_attempts`] attempts have been made, then the object
//!   is dropped and counted in [`RetrievalStats::dropped`].
//! - Detail request answered with 4xx or undecodable JSON: fatal.
//! - Any listing request failure: fatal, never retried.
//!
//! After a fatal error the iterator yields `None`.

use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::locator::ApiLocator;
use super::transport::Transport;
use super::FetchError;
use crate::model::{Bill, Chamber};

/// Bounded retry for transient detail-request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per object, including the first. Values below 1 are
    /// treated as 1.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Counters accumulated while iterating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalStats {
    /// HTTP requests issued (listing + detail, including retries).
    pub requests: usize,
    /// Detail requests repeated after a transient failure.
    pub retries: usize,
    /// Objects skipped after exhausting the retry bound.
    pub dropped: usize,
    /// Records successfully yielded.
    pub fetched: usize,
}

/// A retrieved record and the progress percentage at the time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<R> {
    pub record: R,
    pub progress: u8,
}

#[derive(Debug, Deserialize)]
struct ListingPage {
    meta: PageMeta,
    #[serde(default)]
    objects: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PageMeta {
    offset: u64,
    limit: u64,
    total_count: u64,
}

/// Client for one API host. Holds the listing locator and the retry policy.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base: ApiLocator,
    retry: RetryPolicy,
}

impl<T: Transport> ApiClient<T> {
    /// `base` supplies scheme and host; its path is the default listing path.
    pub fn new(transport: T, base: ApiLocator) -> Self {
        Self {
            transport,
            base,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Bills introduced in `congress` by `chamber`, at most `limit` of them.
    #[instrument(skip(self))]
    pub fn bills(&self, congress: u32, chamber: Chamber, limit: Option<u64>) -> Pages<'_, T, Bill> {
        let mut params = BTreeMap::new();
        params.insert("congress".to_string(), congress.to_string());
        params.insert("bill_type".to_string(), chamber.bill_type().to_string());
        self.query(&self.base.path.clone(), params, limit)
    }

    /// Generic listing query. Every entry of `params` is sent as a query
    /// parameter on listing requests.
    pub fn query<R: DeserializeOwned>(
        &self,
        path: &str,
        params: BTreeMap<String, String>,
        limit: Option<u64>,
    ) -> Pages<'_, T, R> {
        let mut listing = self.base.clone().with_path(path);
        for (name, value) in params {
            listing.set_param(name, value);
        }

        Pages {
            client: self,
            listing,
            limit,
            pending: VecDeque::new(),
            next_offset: None,
            last_page: None,
            visited: 0,
            done: limit == Some(0),
            stats: RetrievalStats::default(),
            _record: PhantomData,
        }
    }
}

/// Lazy, finite, non-restartable sequence of retrieved records.
pub struct Pages<'a, T, R> {
    client: &'a ApiClient<T>,
    listing: ApiLocator,
    limit: Option<u64>,
    pending: VecDeque<Value>,
    next_offset: Option<u64>,
    last_page: Option<PageMeta>,
    visited: u64,
    done: bool,
    stats: RetrievalStats,
    _record: PhantomData<fn() -> R>,
}

impl<T, R> Pages<'_, T, R> {
    /// Counters so far. Final once the iterator has returned `None`.
    #[must_use]
    pub const fn stats(&self) -> RetrievalStats {
        self.stats
    }

    /// Total objects the API reported, once the first page has arrived.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.last_page.map(|meta| meta.total_count)
    }

    /// Progress denominator: the caller's limit, else the reported total.
    fn effective_limit(&self) -> Option<u64> {
        self.limit.or_else(|| self.total_count())
    }

    fn progress(&self) -> u8 {
        match self.effective_limit() {
            Some(0) | None => 100,
            Some(limit) => {
                let pct = (self.visited.saturating_mul(100) / limit).min(100);
                u8::try_from(pct).unwrap_or(100)
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.visited >= limit)
    }
}

impl<T: Transport, R: DeserializeOwned> Pages<'_, T, R> {
    fn fetch_page(&mut self) -> Result<bool, FetchError> {
        if let Some(offset) = self.next_offset {
            self.listing.set_param("offset", offset);
        }
        let url = self.listing.to_url_string();

        self.stats.requests += 1;
        let body = self
            .client
            .transport
            .get_json(&url)
            .map_err(|source| FetchError::Listing { url: url.clone(), source })?;

        let page: ListingPage =
            serde_json::from_value(body).map_err(|err| FetchError::Malformed {
                url: url.clone(),
                message: err.to_string(),
            })?;

        debug!(
            offset = page.meta.offset,
            page_size = page.meta.limit,
            total = page.meta.total_count,
            objects = page.objects.len(),
            "fetched listing page"
        );

        let received = !page.objects.is_empty();
        let next = page.meta.offset.saturating_add(page.meta.limit);
        self.next_offset = Some(next);
        self.last_page = Some(page.meta);
        self.pending.extend(page.objects);

        if page.meta.limit == 0 || next >= page.meta.total_count {
            // Nothing beyond this page; drain what we have and stop.
            self.next_offset = None;
        }

        Ok(received)
    }

    /// Fetch one detail record, applying the retry policy. `Ok(None)` means
    /// the object was dropped after exhausting its attempts.
    fn fetch_detail(&mut self, id: &Value) -> Result<Option<Value>, FetchError> {
        let segment = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let url = self.listing.child(&segment).to_url_string();

        let attempts = self.client.retry.max_attempts.max(1);
        for attempt in 1..=attempts {
            self.stats.requests += 1;
            match self.client.transport.get_json(&url) {
                Ok(body) => return Ok(Some(body)),
                Err(err) if err.is_transient() => {
                    if attempt < attempts {
                        self.stats.retries += 1;
                        debug!(%url, attempt, error = %err, "transient failure, retrying");
                    } else {
                        warn!(%url, attempts, error = %err, "dropping object after repeated failures");
                    }
                }
                Err(source) => return Err(FetchError::Detail { url, source }),
            }
        }

        self.stats.dropped += 1;
        Ok(None)
    }

    fn step(&mut self) -> Result<Option<Fetched<R>>, FetchError> {
        loop {
            if self.limit_reached() {
                return Ok(None);
            }

            let Some(summary) = self.pending.pop_front() else {
                let first = self.last_page.is_none();
                if !first && self.next_offset.is_none() {
                    return Ok(None);
                }
                if !self.fetch_page()? {
                    return Ok(None);
                }
                continue;
            };

            self.visited += 1;
            let progress = self.progress();

            let Some(id) = summary.get("id").cloned() else {
                return Err(FetchError::Malformed {
                    url: self.listing.to_url_string(),
                    message: "listing object without an id".to_string(),
                });
            };

            let Some(body) = self.fetch_detail(&id)? else {
                continue;
            };

            let record = serde_json::from_value::<R>(body).map_err(|err| FetchError::Malformed {
                url: format!("{}/{id}", self.listing.path),
                message: err.to_string(),
            })?;

            self.stats.fetched += 1;
            return Ok(Some(Fetched { record, progress }));
        }
    }
}

impl<T: Transport, R: DeserializeOwned> Iterator for Pages<'_, T, R> {
    type Item = Result<Fetched<R>, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.step() {
            Ok(Some(fetched)) => Some(Ok(fetched)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
