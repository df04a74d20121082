#![no_main]

use caucus_core::model::Bill;
use caucus_graph::network::{build_network, trim_edges};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(bills) = serde_json::from_slice::<Vec<Bill>>(data) else {
        return;
    };
    let Ok(graph) = build_network(&bills) else {
        return;
    };

    assert!(graph.edges().all(|(a, b, w)| a != b && w >= 1));
    assert_eq!(graph.node_map.len(), graph.node_count());

    let trimmed = trim_edges(&graph, 1);
    assert_eq!(trimmed.node_count(), graph.node_count());
    assert!(trimmed.edges().all(|(_, _, w)| w > 1));
});
