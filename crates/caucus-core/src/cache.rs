//! On-disk cache of retrieved bill records.
//!
//! Fetching a full congress takes thousands of requests, so the complete
//! record sequence for each `(congress, chamber)` pair is kept as one JSON
//! array at `{dir}/{congress}_{lower|upper}.json`. [`BillCache::load_or_fetch`]
//! picks the source:
//!
//! 1. **Cache**: the entry exists and `ignore_cache` is off: decode it and
//!    return without touching the network.
//! 2. **Fetch**: otherwise drive the client to completion, then write the
//!    entry and return the fresh records.
//!
//! Writes go to a sibling `.tmp` file that is renamed over the entry, so a
//! reader never sees a partial array. A fetch that fails or is interrupted
//! leaves the previous entry (if any) untouched.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::api::{ApiClient, RetrievalStats, Transport};
use crate::error::CoreError;
use crate::model::{Bill, Chamber};

/// What to retrieve, and whether an existing entry may satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub congress: u32,
    pub chamber: Chamber,
    /// Cap on objects visited. A capped fetch is cached as-is.
    pub limit: Option<u64>,
    pub ignore_cache: bool,
}

/// Where the records of a [`LoadOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from an existing cache entry.
    Cache,
    /// Retrieved from the API and written to the cache.
    Fetched,
}

/// Result of [`BillCache::load_or_fetch`].
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub bills: Vec<Bill>,
    pub source: LoadSource,
    /// Retrieval counters; all zero for [`LoadSource::Cache`].
    pub stats: RetrievalStats,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BillCache {
    dir: PathBuf,
}

impl BillCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `(congress, chamber)`. Chamber aliases share a
    /// path because [`Chamber`] is already normalized.
    #[must_use]
    pub fn entry_path(&self, congress: u32, chamber: Chamber) -> PathBuf {
        self.dir.join(format!("{congress}_{chamber}.json"))
    }

    /// Read an entry. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CacheRead`] or [`CoreError::CacheDecode`] if the
    /// entry exists but cannot be read or decoded.
    pub fn load(&self, congress: u32, chamber: Chamber) -> Result<Option<Vec<Bill>>, CoreError> {
        let path = self.entry_path(congress, chamber);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CoreError::CacheRead { path, source }),
        };

        serde_json::from_slice::<Vec<Bill>>(&bytes)
            .map(Some)
            .map_err(|source| CoreError::CacheDecode { path, source })
    }

    /// Atomically replace the entry for `(congress, chamber)` with `bills`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CacheWrite`] on any I/O failure. The previous
    /// entry is left in place when that happens.
    pub fn store(
        &self,
        congress: u32,
        chamber: Chamber,
        bills: &[Bill],
    ) -> Result<PathBuf, CoreError> {
        let path = self.entry_path(congress, chamber);
        let tmp_path = path.with_extension("json.tmp");

        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, bills).map_err(io::Error::other)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        if let Err(source) = write() {
            match fs::remove_file(&tmp_path) {
                Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                    warn!(path = %tmp_path.display(), "failed to remove temp cache file: {cleanup}");
                }
                _ => {}
            }
            return Err(CoreError::CacheWrite { path, source });
        }

        debug!(path = %path.display(), count = bills.len(), "wrote bill cache");
        Ok(path)
    }

    /// Return cached records for `request`, or fetch and cache them.
    ///
    /// `on_progress` receives 0 before the first request and then the
    /// progress percentage of every retrieved record. It is not called on
    /// the cache path.
    ///
    /// # Errors
    ///
    /// Fails on any fatal retrieval error, or any cache read/write failure.
    /// Nothing is written unless retrieval ran to completion.
    #[instrument(skip(self, client, on_progress))]
    pub fn load_or_fetch<T: Transport>(
        &self,
        client: &ApiClient<T>,
        request: FetchRequest,
        mut on_progress: impl FnMut(u8),
    ) -> Result<LoadOutcome, CoreError> {
        let path = self.entry_path(request.congress, request.chamber);

        if request.ignore_cache {
            debug!("ignoring cache by request");
        } else if let Some(bills) = self.load(request.congress, request.chamber)? {
            info!(count = bills.len(), path = %path.display(), "loaded bills from cache");
            return Ok(LoadOutcome {
                bills,
                source: LoadSource::Cache,
                stats: RetrievalStats::default(),
                path,
            });
        }

        on_progress(0);
        let mut pages = client.bills(request.congress, request.chamber, request.limit);
        let mut bills = Vec::new();
        for item in pages.by_ref() {
            let fetched = item?;
            on_progress(fetched.progress);
            bills.push(fetched.record);
        }
        let stats = pages.stats();

        if stats.dropped > 0 {
            warn!(dropped = stats.dropped, "some bills could not be retrieved");
        }
        info!(
            count = bills.len(),
            requests = stats.requests,
            retries = stats.retries,
            "fetched bills"
        );

        let path = self.store(request.congress, request.chamber, &bills)?;
        Ok(LoadOutcome {
            bills,
            source: LoadSource::Fetched,
            stats,
            path,
        })
    }
}
