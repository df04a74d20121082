//! Degree centrality: number of incident edges per node.

use std::collections::HashMap;

use crate::network::CosponsorGraph;

/// Count incident edges for every node, keyed by bioguide ID.
///
/// The graph is simple, so this equals the number of distinct
/// collaborators. Edge weights are ignored.
#[must_use]
pub fn degree_centrality(g: &CosponsorGraph) -> HashMap<String, usize> {
    g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].key().to_string(), g.graph.edges(idx).count()))
        .collect()
}
