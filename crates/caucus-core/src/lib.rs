#![forbid(unsafe_code)]
//! caucus-core library.
//!
//! Bill and legislator records, paginated retrieval from the bill API, and
//! the on-disk record cache.
//!
//! # Conventions
//!
//! - **Errors**: typed errors via `thiserror` ([`CoreError`], [`api::FetchError`]),
//!   each mapped to a stable [`ErrorCode`]. Config loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{BillCache, FetchRequest, LoadOutcome, LoadSource};
pub use error::{CoreError, ErrorCode};
