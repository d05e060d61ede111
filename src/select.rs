//! Subgraph selection.
//!
//! Derives a working view from the current graph view in one of three
//! modes. Selection operates on views, so modes compose and applying the
//! same mode twice is a no-op.

use thiserror::Error;
use tracing::info;
use wikilens_graph_algorithms::{
    strongly_connected_components, weakly_connected_components, GraphView,
};

/// How to restrict the graph before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubgraphMode {
    /// The whole graph.
    Full,
    /// The largest component: strongly connected for directed views,
    /// connected for undirected ones.
    LargestComponent,
    /// Nodes whose total degree is at least `min_degree`.
    DegreeThreshold { min_degree: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("cannot select the largest component of a graph with no nodes")]
    EmptyGraph,
}

pub type SelectResult<T> = Result<T, SelectError>;

/// Apply a selection mode to the current view.
pub fn apply(view: &GraphView, mode: &SubgraphMode) -> SelectResult<GraphView> {
    match mode {
        SubgraphMode::Full => Ok(view.clone()),

        SubgraphMode::LargestComponent => {
            if view.node_count == 0 {
                return Err(SelectError::EmptyGraph);
            }
            let components = if view.directed {
                strongly_connected_components(view)
            } else {
                weakly_connected_components(view)
            };
            // largest() ties break to the component holding the lowest
            // node index; a non-empty view always has one.
            let keep = components.largest().ok_or(SelectError::EmptyGraph)?;
            let selected = view.induced(keep);
            info!(
                components = components.len(),
                kept = selected.node_count,
                "largest component selected"
            );
            Ok(selected)
        }

        SubgraphMode::DegreeThreshold { min_degree } => {
            let keep: Vec<usize> = (0..view.node_count)
                .filter(|&idx| view.degree(idx) >= *min_degree)
                .collect();
            // An empty result is a valid view, not an error.
            Ok(view.induced(&keep))
        }
    }
}
