//! Network construction from bill records.
//!
//! # Overview
//!
//! Every bill contributes one pairing per cosponsor: `(sponsor, cosponsor)`.
//! A pairing creates the undirected edge with weight 1 or bumps the existing
//! edge's weight by 1. Cosponsors are never paired with each other.
//!
//! ## Node identity
//!
//! Nodes are keyed by bioguide ID. The first attributes seen for a key are
//! kept; later sightings of the same legislator (usually with identical
//! attributes) are ignored.
//!
//! ## Self-pairs
//!
//! A sponsor that also appears in their own cosponsor list contributes no
//! edge for that entry.
//!
//! ## Order
//!
//! Final edge weights depend only on the multiset of bills, not their order.
//! Which attributes a node carries depends on which bill mentions it first.

#![allow(clippy::module_name_repetitions)]

use caucus_core::model::{Bill, Legislator};
use petgraph::graph::NodeIndex;
use tracing::{debug, instrument};

use super::CosponsorGraph;
use crate::error::GraphError;

/// Incremental builder. Feed bills one at a time, then [`finish`].
///
/// [`finish`]: NetworkBuilder::finish
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: CosponsorGraph,
    bills: usize,
    pairings: usize,
    self_pairs: usize,
}

impl NetworkBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one bill's sponsor/cosponsor pairings.
    ///
    /// # Errors
    ///
    /// Returns an error if any legislator name lacks a party suffix. The
    /// builder may already hold nodes from earlier legislators of the same
    /// bill when that happens.
    pub fn add_bill(&mut self, bill: &Bill) -> Result<(), GraphError> {
        let sponsor = self.ensure(&bill.sponsor)?;

        for cosponsor in &bill.cosponsors {
            let cosponsor = self.ensure(cosponsor)?;
            if self.graph.add_collaboration(sponsor, cosponsor).is_none() {
                self.self_pairs += 1;
            }
        }

        self.pairings += bill.pairing_count();
        self.bills += 1;
        Ok(())
    }

    /// Sponsor/cosponsor pairings seen so far, self-pairs included.
    #[must_use]
    pub const fn pairings(&self) -> usize {
        self.pairings
    }

    /// Pairings skipped because the sponsor cosponsored their own bill.
    #[must_use]
    pub const fn self_pairs(&self) -> usize {
        self.self_pairs
    }

    /// Every sighting is cleaned, so a malformed name fails the build even
    /// when the legislator is already in the graph.
    fn ensure(&mut self, legislator: &Legislator) -> Result<NodeIndex, GraphError> {
        let attrs = legislator.clean()?;
        Ok(self.graph.ensure_node(attrs).0)
    }

    #[must_use]
    pub fn finish(self) -> CosponsorGraph {
        debug!(
            bills = self.bills,
            pairings = self.pairings,
            self_pairs = self.self_pairs,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "built co-sponsorship network"
        );
        self.graph
    }
}

/// Build the co-sponsorship network for `bills`.
///
/// # Errors
///
/// Returns [`GraphError::Record`] if a legislator name cannot be parsed.
#[instrument(skip(bills), fields(bills = bills.len()))]
pub fn build_network(bills: &[Bill]) -> Result<CosponsorGraph, GraphError> {
    let mut builder = NetworkBuilder::new();
    for bill in bills {
        builder.add_bill(bill)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caucus_core::CoreError;
    use caucus_core::model::Party;
    use serde_json::json;

    fn person(key: &str, party: &str) -> serde_json::Value {
        json!({
            "id": key.bytes().map(u64::from).sum::<u64>(),
            "bioguideid": key,
            "name": format!("Rep. {key} [{party}-NY1]"),
        })
    }

    fn bill(sponsor: &str, cosponsors: &[&str]) -> Bill {
        serde_json::from_value(json!({
            "sponsor": person(sponsor, "D"),
            "cosponsors": cosponsors.iter().map(|c| person(c, "R")).collect::<Vec<_>>(),
        }))
        .expect("bill")
    }

    #[test]
    fn empty_input_produces_empty_graph() {
        let g = build_network(&[]).expect("build");
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn sponsor_without_cosponsors_is_an_isolated_node() {
        let g = build_network(&[bill("A", &[])]).expect("build");
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn three_bill_scenario() {
        let bills = [bill("A", &["B"]), bill("A", &["B", "C"]), bill("B", &["C"])];
        let g = build_network(&bills).expect("build");

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.weight("A", "B"), Some(2));
        assert_eq!(g.weight("A", "C"), Some(1));
        assert_eq!(g.weight("B", "C"), Some(1));
    }

    #[test]
    fn cosponsors_are_not_paired_with_each_other() {
        let g = build_network(&[bill("A", &["B", "C", "D"])]).expect("build");
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.weight("B", "C"), None);
        assert_eq!(g.weight("C", "D"), None);
    }

    #[test]
    fn self_pairing_is_skipped() {
        let g = build_network(&[bill("A", &["A", "B"])]).expect("build");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight("A", "A"), None);
        assert!(g.edges().all(|(a, b, _)| a != b));
    }

    #[test]
    fn builder_counts_pairings_and_self_pairs() {
        let mut builder = NetworkBuilder::new();
        for b in [bill("A", &["A", "B"]), bill("B", &["C"]), bill("C", &[])] {
            builder.add_bill(&b).expect("add bill");
        }
        assert_eq!(builder.pairings(), 3);
        assert_eq!(builder.self_pairs(), 1);

        let g = builder.finish();
        let total: u32 = g.edges().map(|(_, _, w)| w).sum();
        assert_eq!(total, 2, "every non-self pairing lands on an edge");
    }

    #[test]
    fn first_sighting_sets_attributes() {
        // "B" is first seen as a Republican cosponsor, later as a sponsor
        // whose record claims Democrat. The first record wins.
        let g = build_network(&[bill("A", &["B"]), bill("B", &["A"])]).expect("build");
        let b = g.node("B").expect("B");
        assert_eq!(b.attrs.party_affiliation, Party::Republican);
        assert_eq!(g.weight("A", "B"), Some(2));
    }

    #[test]
    fn bad_name_is_fatal() {
        let bad: Bill = serde_json::from_value(json!({
            "sponsor": person("A", "D"),
            "cosponsors": [{"id": 9, "bioguideid": "Z", "name": "Rep. Nobody"}],
        }))
        .expect("bill");

        let err = build_network(&[bad]).expect_err("parse failure");
        assert!(matches!(err, GraphError::Record(CoreError::NameParse(_))));
    }

    #[test]
    fn malformed_repeat_sighting_is_still_fatal() {
        let good = bill("A", &["B"]);
        let mut dup = bill("A", &[]);
        dup.sponsor.name = "Rep. A".into();

        assert!(build_network(&[good, dup]).is_err());
    }
}
