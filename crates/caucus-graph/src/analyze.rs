//! Centrality analysis and ranking.
//!
//! Centrality is computed on a copy of the graph trimmed at a fixed weight
//! (by default [`CENTRALITY_TRIM_WEIGHT`]) and written back onto the
//! caller's graph. The caller's graph may itself be trimmed at a different
//! weight; the two thresholds are independent.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::metrics::{betweenness_centrality, degree_centrality};
use crate::network::{CosponsorGraph, LegislatorNode, ResizeMetric, trim_edges};

/// Edges at or below this weight are ignored when computing centrality.
pub const CENTRALITY_TRIM_WEIGHT: u32 = caucus_core::config::DEFAULT_CENTRALITY_TRIM;

/// Per-node centrality scores keyed by bioguide ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centrality {
    pub betweenness: HashMap<String, f64>,
    pub degree: HashMap<String, usize>,
}

/// Compute degree and betweenness on `graph` trimmed at `trim`.
#[must_use]
pub fn compute_centrality(graph: &CosponsorGraph, trim: u32) -> Centrality {
    let topology = trim_edges(graph, trim);
    debug!(
        trim,
        edges = topology.edge_count(),
        dropped = graph.edge_count() - topology.edge_count(),
        "centrality topology"
    );
    Centrality {
        betweenness: betweenness_centrality(&topology),
        degree: degree_centrality(&topology),
    }
}

/// Attach `betweenness` and `degree` to every node of `graph`.
///
/// Nodes missing from the centrality topology score 0.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn analyze(graph: &mut CosponsorGraph, centrality_trim: u32) -> Centrality {
    let centrality = compute_centrality(graph, centrality_trim);
    for node in graph.graph.node_weights_mut() {
        let key = node.key();
        let betweenness = centrality.betweenness.get(key).copied().unwrap_or(0.0);
        let degree = centrality.degree.get(key).copied().unwrap_or(0);
        node.betweenness = Some(betweenness);
        node.degree = Some(degree);
    }
    centrality
}

/// Metric value of `node`, 0 when not yet analyzed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metric_value(node: &LegislatorNode, metric: ResizeMetric) -> f64 {
    match metric {
        ResizeMetric::Betweenness => node.betweenness.unwrap_or(0.0),
        ResizeMetric::Degree => node.degree.unwrap_or(0) as f64,
    }
}

/// Nodes ordered by `(metric value, bioguide ID)`.
///
/// With `descending` the whole order is reversed, so ties on the metric
/// fall back to reverse key order.
#[must_use]
pub fn rank_nodes(
    graph: &CosponsorGraph,
    metric: ResizeMetric,
    descending: bool,
) -> Vec<&LegislatorNode> {
    let mut nodes: Vec<&LegislatorNode> = graph.nodes().collect();
    nodes.sort_by(|a, b| {
        let ord = metric_value(a, metric)
            .total_cmp(&metric_value(b, metric))
            .then_with(|| a.key().cmp(b.key()));
        if descending { ord.reverse() } else { ord }
    });
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::build_network;
    use caucus_core::model::Bill;
    use serde_json::json;

    fn bill(sponsor: &str, cosponsors: &[&str]) -> Bill {
        let person =
            |key: &str| json!({"id": 7, "bioguideid": key, "name": format!("Rep. {key} [R-OH3]")});
        serde_json::from_value(json!({
            "sponsor": person(sponsor),
            "cosponsors": cosponsors.iter().map(|c| person(c)).collect::<Vec<_>>(),
        }))
        .expect("bill")
    }

    fn repeat(n: usize, sponsor: &str, cosponsors: &[&str]) -> Vec<Bill> {
        (0..n).map(|_| bill(sponsor, cosponsors)).collect()
    }

    #[test]
    fn every_node_gets_both_metrics() {
        let mut g = build_network(&[bill("A", &["B"]), bill("C", &[])]).expect("build");
        analyze(&mut g, 0);
        for node in g.nodes() {
            assert!(node.betweenness.is_some());
            assert!(node.degree.is_some());
        }
        assert_eq!(g.node("C").and_then(|n| n.degree), Some(0));
        assert_eq!(g.node("C").and_then(|n| n.betweenness), Some(0.0));
    }

    #[test]
    fn centrality_ignores_weak_edges() {
        // A-B and B-C have weight 11, C-D only 1. At the default threshold
        // D is isolated for centrality purposes but keeps its edge.
        let mut bills = repeat(11, "A", &["B"]);
        bills.extend(repeat(11, "B", &["C"]));
        bills.push(bill("C", &["D"]));
        let mut g = build_network(&bills).expect("build");

        analyze(&mut g, CENTRALITY_TRIM_WEIGHT);

        assert_eq!(g.edge_count(), 3, "caller's graph keeps its edges");
        assert_eq!(g.node("B").and_then(|n| n.degree), Some(2));
        assert_eq!(g.node("B").and_then(|n| n.betweenness), Some(1.0));
        assert_eq!(g.node("C").and_then(|n| n.degree), Some(1));
        assert_eq!(g.node("D").and_then(|n| n.degree), Some(0));
    }

    #[test]
    fn analyze_works_on_a_user_trimmed_graph() {
        let mut bills = repeat(3, "A", &["B"]);
        bills.push(bill("B", &["C"]));
        let g = build_network(&bills).expect("build");
        let mut trimmed = trim_edges(&g, 1);

        analyze(&mut trimmed, 0);

        assert_eq!(trimmed.edge_count(), 1);
        assert_eq!(trimmed.node("C").and_then(|n| n.degree), Some(0));
        assert_eq!(trimmed.node("A").and_then(|n| n.degree), Some(1));
    }

    #[test]
    fn ranking_breaks_ties_by_key() {
        let mut g = build_network(&[bill("B", &["A", "C"]), bill("D", &["E"])]).expect("build");
        analyze(&mut g, 0);

        let asc: Vec<&str> = rank_nodes(&g, ResizeMetric::Degree, false)
            .into_iter()
            .map(LegislatorNode::key)
            .collect();
        assert_eq!(asc, ["A", "C", "D", "E", "B"]);

        let desc: Vec<&str> = rank_nodes(&g, ResizeMetric::Degree, true)
            .into_iter()
            .map(LegislatorNode::key)
            .collect();
        assert_eq!(desc, ["B", "E", "D", "C", "A"]);
    }

    #[test]
    fn ranking_by_betweenness_puts_bridge_first() {
        let mut g =
            build_network(&[bill("A", &["B"]), bill("B", &["C"]), bill("C", &["D"])])
                .expect("build");
        analyze(&mut g, 0);

        let top: Vec<&str> = rank_nodes(&g, ResizeMetric::Betweenness, true)
            .into_iter()
            .take(2)
            .map(LegislatorNode::key)
            .collect();
        assert_eq!(top, ["C", "B"]);
    }
}
