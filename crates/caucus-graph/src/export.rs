//! Graph export.
//!
//! The only supported format is node-link JSON, the shape force-directed
//! browser layouts consume:
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "graph": {"resize": "betweenness"},
//!   "nodes": [{"id": "A000001", "name": "...", "party_affiliation": "democrat", ...}],
//!   "links": [{"source": 0, "target": 1, "weight": 3}]
//! }
//! ```
//!
//! `source` and `target` are positions in `nodes`.

use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::network::CosponsorGraph;

/// Path that selects standard output.
pub const STDOUT_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    NodeLinkJson,
}

impl ExportFormat {
    /// File extensions accepted by [`from_path`](Self::from_path).
    pub const SUPPORTED: &'static [&'static str] = &["json"];

    /// Pick a format from the output path's extension.
    ///
    /// `-` (stdout) always selects node-link JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedFormat`] for a missing or unknown
    /// extension.
    pub fn from_path(path: &Path) -> Result<Self, GraphError> {
        if path.as_os_str() == STDOUT_PATH {
            return Ok(Self::NodeLinkJson);
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::NodeLinkJson),
            _ => Err(GraphError::UnsupportedFormat {
                extension,
                supported: Self::SUPPORTED.to_vec(),
            }),
        }
    }
}

/// Node-link JSON representation of `graph`.
///
/// # Errors
///
/// Returns [`GraphError::Serialize`] if a node's attributes do not serialize
/// to a JSON object.
pub fn node_link(graph: &CosponsorGraph) -> Result<Value, GraphError> {
    let mut nodes = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let mut entry = Map::new();
        entry.insert("id".to_string(), Value::String(node.key().to_string()));
        if let Value::Object(attrs) = serde_json::to_value(node)? {
            entry.extend(attrs);
        }
        nodes.push(Value::Object(entry));
    }

    let links: Vec<Value> = graph
        .graph
        .raw_edges()
        .iter()
        .map(|edge| {
            json!({
                "source": edge.source().index(),
                "target": edge.target().index(),
                "weight": edge.weight.weight,
            })
        })
        .collect();

    let mut meta = Map::new();
    if let Some(resize) = graph.resize {
        meta.insert("resize".to_string(), Value::String(resize.as_str().to_string()));
    }

    Ok(json!({
        "directed": false,
        "multigraph": false,
        "graph": meta,
        "nodes": nodes,
        "links": links,
    }))
}

/// Write `graph` to `path` in the format its extension selects.
///
/// # Errors
///
/// Returns an error for an unsupported extension or if writing fails.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn write_graph(graph: &CosponsorGraph, path: &Path) -> Result<(), GraphError> {
    let ExportFormat::NodeLinkJson = ExportFormat::from_path(path)?;
    let value = node_link(graph)?;
    let write_err = |source: std::io::Error| GraphError::Write {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == STDOUT_PATH {
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &value)?;
        writeln!(out).map_err(write_err)?;
    } else {
        let mut body = serde_json::to_vec_pretty(&value)?;
        body.push(b'\n');
        std::fs::write(path, body).map_err(write_err)?;
    }

    debug!(path = %path.display(), "graph exported");
    Ok(())
}
