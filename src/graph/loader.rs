//! Graph file loading.
//!
//! The on-disk format is a JSON node/edge list with optional attribute
//! maps and the directedness flag embedded in the document:
//!
//! ```json
//! {
//!   "directed": true,
//!   "nodes": [{"id": "Dragon", "attrs": {"namespace": "Monster"}}],
//!   "edges": [{"source": "Dragon", "target": "Cave"}]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::attr::AttrMap;
use super::model::{Graph, GraphError};

/// A graph source could not be turned into a [`Graph`].
///
/// Load failures abort the current request only; the caller may retry
/// with a corrected source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read graph file `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse graph file `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid graph in `{path}`")]
    Invalid {
        path: PathBuf,
        #[source]
        source: GraphError,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
struct GraphFile {
    directed: bool,
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    edges: Vec<EdgeSpec>,
}

#[derive(Debug, Deserialize)]
struct NodeSpec {
    id: String,
    #[serde(default)]
    attrs: AttrMap,
}

#[derive(Debug, Deserialize)]
struct EdgeSpec {
    source: String,
    target: String,
    #[serde(default)]
    attrs: AttrMap,
}

/// Load a graph from a JSON node/edge-list file.
pub fn load_graph(path: &Path) -> LoadResult<Graph> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: GraphFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut graph = Graph::new(doc.directed);
    for node in doc.nodes {
        graph
            .add_node(node.id, node.attrs)
            .map_err(|source| LoadError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
    }
    for edge in doc.edges {
        graph
            .add_edge(&edge.source, &edge.target, edge.attrs)
            .map_err(|source| LoadError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
    }

    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );
    Ok(graph)
}

impl Graph {
    /// Convenience wrapper around [`load_graph`].
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Graph> {
        load_graph(path.as_ref())
    }
}
