//! Weight-threshold edge trimming.

use super::CosponsorGraph;

/// Copy of `graph` without the edges whose weight is `<= weight`.
///
/// Every node is kept, including ones left isolated, so node indices and
/// `node_map` stay valid. The input graph is not modified.
#[must_use]
pub fn trim_edges(graph: &CosponsorGraph, weight: u32) -> CosponsorGraph {
    let mut trimmed = graph.clone();
    trimmed
        .graph
        .retain_edges(|g, e| g.edge_weight(e).is_some_and(|c| c.weight > weight));
    trimmed
}
