//! Known-topology regression tests for the analysis pipeline.
//!
//! Each test feeds hand-written bill records through build, trim and
//! analyze. Expected values are worked out by hand and hardcoded.

use caucus_core::BillCache;
use caucus_core::model::{Bill, Chamber};
use caucus_graph::analyze::{analyze, compute_centrality, rank_nodes};
use caucus_graph::export::node_link;
use caucus_graph::network::{LegislatorNode, ResizeMetric, build_network, trim_edges};
use caucus_graph::{CosponsorGraph, GraphStats};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn person(key: &str, party: &str) -> serde_json::Value {
    json!({
        "id": 400_000 + key.len(),
        "bioguideid": key,
        "name": format!("Rep. {key} [{party}-PA7]"),
        "youtubeid": null,
        "twitterid": format!("rep{key}"),
        "cspanid": 1234,
        "firstname": key,
    })
}

fn bill(sponsor: &str, cosponsors: &[&str]) -> Bill {
    serde_json::from_value(json!({
        "number": 1,
        "title": format!("H.R. 1: A bill from {sponsor}"),
        "sponsor": person(sponsor, "D"),
        "cosponsors": cosponsors.iter().map(|c| person(c, "R")).collect::<Vec<_>>(),
    }))
    .expect("bill")
}

fn copies(n: usize, sponsor: &str, cosponsors: &[&str]) -> Vec<Bill> {
    (0..n).map(|_| bill(sponsor, cosponsors)).collect()
}

fn keys<'a>(nodes: impl IntoIterator<Item = &'a LegislatorNode>) -> Vec<&'a str> {
    nodes.into_iter().map(LegislatorNode::key).collect()
}

// ===========================================================================
// Three bills
//
//   Bill1(A; B), Bill2(A; B, C), Bill3(B; C)
//
//   A ==2== B
//    \     /
//     1   1
//      \ /
//       C
// ===========================================================================

fn three_bills() -> Vec<Bill> {
    vec![bill("A", &["B"]), bill("A", &["B", "C"]), bill("B", &["C"])]
}

#[test]
fn three_bills_weights() {
    let g = build_network(&three_bills()).expect("build");
    assert_eq!(g.weight("A", "B"), Some(2));
    assert_eq!(g.weight("A", "C"), Some(1));
    assert_eq!(g.weight("B", "C"), Some(1));
}

#[test]
fn three_bills_trim_at_one() {
    let g = build_network(&three_bills()).expect("build");
    let t = trim_edges(&g, 1);
    let edges: Vec<_> = t.edges().collect();
    assert_eq!(edges, [("A", "B", 2)]);
    assert_eq!(t.node_count(), 3);
}

#[test]
fn cleaned_attributes_reach_the_node() {
    let g = build_network(&three_bills()).expect("build");
    let a = g.node("A").expect("A");
    let value = serde_json::to_value(a).expect("serialize");

    assert_eq!(value["govtrackid"], json!(400_001));
    assert_eq!(value["party_affiliation"], json!("democrat"));
    assert_eq!(value["firstname"], json!("A"));
    for dropped in ["youtubeid", "twitterid", "cspanid", "id"] {
        assert!(value.get(dropped).is_none(), "{dropped} should be dropped");
    }
}

// ===========================================================================
// Star: hub H sponsors with every leaf, 12 bills each
//
//   L1   L2
//     \ /
//      H
//     / \
//   L3   L4
//
// Betweenness(H) = C(4,2) = 6; leaves 0. Degree(H) = 4.
// ===========================================================================

#[test]
fn star_centrality_above_default_trim() {
    let bills = copies(12, "H", &["L1", "L2", "L3", "L4"]);
    let mut g = build_network(&bills).expect("build");
    analyze(&mut g, caucus_graph::CENTRALITY_TRIM_WEIGHT);

    let hub = g.node("H").expect("H");
    assert_eq!(hub.degree, Some(4));
    assert_eq!(hub.betweenness, Some(6.0));
    for leaf in ["L1", "L2", "L3", "L4"] {
        let node = g.node(leaf).expect("leaf");
        assert_eq!(node.degree, Some(1));
        assert_eq!(node.betweenness, Some(0.0));
    }

    let ranked = rank_nodes(&g, ResizeMetric::Betweenness, true);
    assert_eq!(ranked[0].key(), "H");
}

#[test]
fn star_below_default_trim_scores_zero() {
    // Each edge has weight 1, so the centrality topology is empty.
    let bills = copies(1, "H", &["L1", "L2", "L3"]);
    let mut g = build_network(&bills).expect("build");
    analyze(&mut g, caucus_graph::CENTRALITY_TRIM_WEIGHT);

    assert_eq!(g.edge_count(), 3);
    for node in g.nodes() {
        assert_eq!(node.degree, Some(0));
        assert_eq!(node.betweenness, Some(0.0));
    }
}

// ===========================================================================
// Two triangles joined through X
//
//   A       E
//   | \   / |
//   |  C-X-D  |
//   | /     \ |
//   B       F
//
// X is the only route between the blocs. C and D are cut vertices too, but
// each separates one fewer pair.
// ===========================================================================

#[test]
fn bridge_has_highest_betweenness() {
    let bills = vec![
        bill("A", &["B", "C"]),
        bill("B", &["C"]),
        bill("C", &["X"]),
        bill("X", &["D"]),
        bill("D", &["E", "F"]),
        bill("E", &["F"]),
    ];
    let g = build_network(&bills).expect("build");
    let centrality = compute_centrality(&g, 0);

    let x = centrality.betweenness["X"];
    for (key, score) in &centrality.betweenness {
        if key != "X" {
            assert!(x > *score, "X ({x}) should beat {key} ({score})");
        }
    }
    // Pairs crossing X: {A,B,C} x {D,E,F} = 9.
    assert!((x - 9.0).abs() < 1e-10);
    // C separates {A,B} from {X,D,E,F}: 8.
    assert!((centrality.betweenness["C"] - 8.0).abs() < 1e-10);
}

#[test]
fn stats_for_disconnected_blocs() {
    let bills = vec![bill("A", &["B", "C"]), bill("D", &["E"])];
    let g = build_network(&bills).expect("build");
    let stats = GraphStats::compute(&g);

    assert_eq!(stats.components, 2);
    assert_eq!(stats.isolated, 0);
    assert_eq!(stats.parties.get("democrat"), Some(&2));
    assert_eq!(stats.parties.get("republican"), Some(&3));
}

// ===========================================================================
// Cache round-trip
// ===========================================================================

#[test]
fn cached_records_build_identical_graph() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = BillCache::new(dir.path());
    let bills = three_bills();

    cache.store(113, Chamber::Lower, &bills).expect("store");
    let loaded = cache
        .load(113, Chamber::Lower)
        .expect("load")
        .expect("cache entry");

    let original = build_network(&bills).expect("build original");
    let replayed = build_network(&loaded).expect("build replayed");
    assert_eq!(original.content_hash(), replayed.content_hash());
    assert_eq!(keys(original.nodes()), keys(replayed.nodes()));
}

#[test]
fn analyzed_export_round_trips_through_json() {
    let mut g: CosponsorGraph = build_network(&copies(11, "A", &["B", "C"])).expect("build");
    analyze(&mut g, caucus_graph::CENTRALITY_TRIM_WEIGHT);
    g.resize = Some(ResizeMetric::Degree);

    let value = node_link(&g).expect("node link");
    let text = serde_json::to_string(&value).expect("to string");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("parse");

    assert_eq!(parsed["graph"]["resize"], json!("degree"));
    assert_eq!(parsed["nodes"][0]["id"], json!("A"));
    assert_eq!(parsed["nodes"][0]["degree"], json!(2));
    assert_eq!(parsed["links"][0]["weight"], json!(11));
}
