//! Centrality metrics for the co-sponsorship network.
//!
//! # Overview
//!
//! Each metric answers a different question about a legislator's position:
//!
//! - **Degree** (`degree`): how many distinct colleagues share a bill with
//!   them?
//! - **Betweenness** (`betweenness`): which legislators bridge otherwise
//!   separate groups?
//!
//! Both take a [`CosponsorGraph`](crate::network::CosponsorGraph) and return
//! scores keyed by bioguide ID. Edge weights never enter either metric; trim
//! the graph first to restrict the topology to strong collaborations.
//!
//! ```rust,ignore
//! use caucus_graph::metrics::{betweenness::betweenness_centrality, degree::degree_centrality};
//!
//! let bc = betweenness_centrality(&graph);
//! let deg = degree_centrality(&graph);
//! ```

pub mod betweenness;
pub mod degree;

pub use betweenness::betweenness_centrality;
pub use degree::degree_centrality;
