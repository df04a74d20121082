#![forbid(unsafe_code)]
//! caucus-graph library.
//!
//! Builds the legislator co-sponsorship network from bill records, trims weak
//! edges, computes centrality, and exports node-link JSON.
//!
//! # Conventions
//!
//! - **Errors**: typed errors via `thiserror` ([`GraphError`]), carrying the
//!   [`caucus_core::ErrorCode`] of their cause.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analyze;
pub mod error;
pub mod export;
pub mod metrics;
pub mod network;
pub mod stats;

pub use analyze::{CENTRALITY_TRIM_WEIGHT, analyze, rank_nodes};
pub use error::GraphError;
pub use network::{CosponsorGraph, LegislatorNode, ResizeMetric, build_network, trim_edges};
pub use stats::GraphStats;
