//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a legislator lies on shortest
//! paths between two other legislators. High-betweenness members are the
//! bridges between otherwise separate blocs.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Edge weights are ignored: path length is hop count. When several shortest
//! paths join a pair, each intermediate node gets its share of the credit.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Scores are **not** normalized by node count. Each unordered pair is
//! counted once: the graph is undirected, so every pair is reached from both
//! ends and the summed dependencies are halved.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::network::CosponsorGraph;

/// Compute betweenness centrality for every node, keyed by bioguide ID.
///
/// Isolated nodes and nodes no shortest path passes through score 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn betweenness_centrality(g: &CosponsorGraph) -> HashMap<String, f64> {
    let graph = &g.graph;
    let n = graph.node_count();

    if n == 0 {
        return HashMap::new();
    }

    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.node_indices() {
        let si = s.index();

        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w]: nodes immediately before w on shortest paths from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for w in graph.neighbors(v) {
                let wi = w.index();

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    graph
        .node_indices()
        .map(|idx| (graph[idx].key().to_string(), cb[idx.index()] / 2.0))
        .collect()
}
