//! Whole-graph summary statistics.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::network::CosponsorGraph;

/// Summary of a co-sponsorship network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Sum of edge weights: the number of sponsor/cosponsor pairings.
    pub total_weight: u64,
    pub max_weight: u32,
    /// `edges / (n * (n - 1) / 2)`; 0.0 below two nodes.
    pub density: f64,
    pub components: usize,
    /// Nodes with no incident edge.
    pub isolated: usize,
    /// Node count per party label.
    pub parties: BTreeMap<String, usize>,
}

impl GraphStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(g: &CosponsorGraph) -> Self {
        let nodes = g.node_count();
        let edges = g.edge_count();

        let density = if nodes < 2 {
            0.0
        } else {
            edges as f64 / ((nodes * (nodes - 1)) as f64 / 2.0)
        };

        let mut parties = BTreeMap::new();
        for node in g.nodes() {
            *parties
                .entry(node.attrs.party_affiliation.to_string())
                .or_insert(0) += 1;
        }

        Self {
            nodes,
            edges,
            total_weight: g.edges().map(|(_, _, w)| u64::from(w)).sum(),
            max_weight: g.edges().map(|(_, _, w)| w).max().unwrap_or(0),
            density,
            components: connected_components(&g.graph),
            isolated: g
                .graph
                .node_indices()
                .filter(|&idx| g.graph.neighbors(idx).next().is_none())
                .count(),
            parties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::build_network;
    use caucus_core::model::Bill;
    use serde_json::json;

    fn person(key: &str, party: char) -> serde_json::Value {
        json!({"id": 1, "bioguideid": key, "name": format!("Rep. {key} [{party}-MA2]")})
    }

    #[test]
    fn empty_graph_is_all_zero() {
        let stats = GraphStats::compute(&CosponsorGraph::new());
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.components, 0);
        assert!(stats.density.abs() < f64::EPSILON);
    }

    #[test]
    fn summarizes_small_network() {
        let bills: Vec<Bill> = [
            json!({"sponsor": person("A", 'D'), "cosponsors": [person("B", 'R'), person("C", 'I')]}),
            json!({"sponsor": person("A", 'D'), "cosponsors": [person("B", 'R')]}),
            json!({"sponsor": person("D", 'D')}),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("bill"))
        .collect();
        let g = build_network(&bills).expect("build");
        let stats = GraphStats::compute(&g);

        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.total_weight, 3);
        assert_eq!(stats.max_weight, 2);
        assert_eq!(stats.components, 2);
        assert_eq!(stats.isolated, 1);
        assert!((stats.density - 2.0 / 6.0).abs() < 1e-10);
        assert_eq!(stats.parties.get("democrat"), Some(&2));
        assert_eq!(stats.parties.get("republican"), Some(&1));
        assert_eq!(stats.parties.get("independent"), Some(&1));
    }
}
