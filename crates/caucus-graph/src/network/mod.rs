//! Co-sponsorship network.
//!
//! # Overview
//!
//! Nodes are legislators keyed by bioguide ID; an undirected edge joins a
//! sponsor and a cosponsor, weighted by the number of bills they share.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<Bill>
//!        ↓  build::build_network()
//! CosponsorGraph (all edges, weight >= 1)
//!        ↓  trim::trim_edges(w)          (optional, user-chosen)
//! CosponsorGraph (edges with weight > w)
//!        ↓  analyze::analyze()           (centrality on a copy trimmed at 10)
//! CosponsorGraph with betweenness/degree on every node
//!        ↓  export::write_graph()
//! node-link JSON
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use caucus_graph::network::{build::build_network, trim::trim_edges};
//! use caucus_graph::analyze::analyze;
//!
//! let mut graph = build_network(&bills)?;
//! graph = trim_edges(&graph, 1);
//! analyze(&mut graph, caucus_graph::analyze::CENTRALITY_TRIM_WEIGHT);
//! ```

pub mod build;
pub mod trim;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use caucus_core::model::LegislatorAttrs;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

pub use build::{NetworkBuilder, build_network};
pub use trim::trim_edges;

/// A graph node: cleaned legislator attributes plus centrality results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislatorNode {
    #[serde(flatten)]
    pub attrs: LegislatorAttrs,
    /// Unnormalized betweenness; `None` until analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub betweenness: Option<f64>,
    /// Incident edges in the centrality topology; `None` until analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
}

impl LegislatorNode {
    #[must_use]
    pub const fn new(attrs: LegislatorAttrs) -> Self {
        Self {
            attrs,
            betweenness: None,
            degree: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.attrs.bioguideid
    }
}

/// Edge payload: number of bills the two legislators share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub weight: u32,
}

/// Node attribute a renderer should scale node size by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMetric {
    Degree,
    Betweenness,
}

impl ResizeMetric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
        }
    }
}

impl fmt::Display for ResizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degree" => Ok(Self::Degree),
            "betweenness" => Ok(Self::Betweenness),
            other => Err(format!(
                "unknown resize metric '{other}': expected degree or betweenness"
            )),
        }
    }
}

/// Undirected simple graph of legislators.
///
/// `node_map` is kept in sync with `graph`; nodes are never removed, so
/// indices stay valid across [`trim_edges`].
#[derive(Debug, Clone, Default)]
pub struct CosponsorGraph {
    pub graph: UnGraph<LegislatorNode, Collaboration>,
    pub node_map: HashMap<String, NodeIndex>,
    /// Renderer hint; not used by any computation.
    pub resize: Option<ResizeMetric>,
}

impl CosponsorGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.node_map.get(key).copied()
    }

    #[must_use]
    pub fn node(&self, key: &str) -> Option<&LegislatorNode> {
        self.node_index(key).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Nodes in insertion (first-seen) order.
    pub fn nodes(&self) -> impl Iterator<Item = &LegislatorNode> {
        self.graph.node_weights()
    }

    /// Edges as `(key, key, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].key(),
                self.graph[edge.target()].key(),
                edge.weight().weight,
            )
        })
    }

    /// Weight of the edge between `a` and `b`, if any.
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let (ia, ib) = (self.node_index(a)?, self.node_index(b)?);
        self.graph
            .find_edge(ia, ib)
            .and_then(|e| self.graph.edge_weight(e))
            .map(|c| c.weight)
    }

    /// Insert a node for `attrs` unless its key is already present.
    ///
    /// The first attributes seen for a key win; later sightings never
    /// overwrite them. Returns the node index and whether it was inserted.
    pub fn ensure_node(&mut self, attrs: LegislatorAttrs) -> (NodeIndex, bool) {
        if let Some(&idx) = self.node_map.get(&attrs.bioguideid) {
            return (idx, false);
        }
        let key = attrs.bioguideid.clone();
        let idx = self.graph.add_node(LegislatorNode::new(attrs));
        self.node_map.insert(key, idx);
        (idx, true)
    }

    /// Record one more shared bill between `a` and `b`, returning the new
    /// weight. Self-pairs are ignored and return `None`.
    pub fn add_collaboration(&mut self, a: NodeIndex, b: NodeIndex) -> Option<u32> {
        if a == b {
            return None;
        }
        if let Some(edge) = self.graph.find_edge(a, b) {
            let collab = &mut self.graph[edge];
            collab.weight += 1;
            Some(collab.weight)
        } else {
            self.graph.add_edge(a, b, Collaboration { weight: 1 });
            Some(1)
        }
    }

    /// BLAKE3 hash over the sorted node keys and sorted weighted edge list.
    ///
    /// Two graphs with the same nodes and edge weights hash equal regardless
    /// of insertion order or node attributes.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut keys: Vec<&str> = self.nodes().map(LegislatorNode::key).collect();
        keys.sort_unstable();

        let mut edges: Vec<(&str, &str, u32)> = self
            .edges()
            .map(|(a, b, w)| if a <= b { (a, b, w) } else { (b, a, w) })
            .collect();
        edges.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for key in keys {
            hasher.update(key.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for (a, b, w) in edges {
            hasher.update(a.as_bytes());
            hasher.update(b"\x00");
            hasher.update(b.as_bytes());
            hasher.update(b"\x00");
            hasher.update(&w.to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize())
    }
}
