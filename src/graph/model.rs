//! In-memory attributed graph.
//!
//! Nodes are opaque string identifiers stored in insertion order; that
//! order is the deterministic enumeration order every downstream
//! computation relies on. Directedness is fixed at construction and never
//! changes for the lifetime of a graph.

use indexmap::IndexMap;
use thiserror::Error;
use wikilens_graph_algorithms::GraphView;

use super::attr::AttrMap;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),

    #[error("edge references unknown source node `{0}`")]
    UnknownSource(String),

    #[error("edge references unknown target node `{0}`")]
    UnknownTarget(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// An edge between two nodes, by dense node index.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
    pub attrs: AttrMap,
}

/// An attributed graph with fixed directedness.
///
/// The graph is the sole owner of node and edge data; views, metrics, and
/// visual attributes are all derived, read-only projections.
#[derive(Debug)]
pub struct Graph {
    directed: bool,
    nodes: IndexMap<String, AttrMap>,
    edges: Vec<EdgeRecord>,
    out_degrees: Vec<usize>,
    in_degrees: Vec<usize>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Graph {
            directed,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            out_degrees: Vec::new(),
            in_degrees: Vec::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node; identifiers must be unique.
    pub fn add_node(&mut self, id: impl Into<String>, attrs: AttrMap) -> GraphResult<usize> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let idx = self.nodes.len();
        self.nodes.insert(id, attrs);
        self.out_degrees.push(0);
        self.in_degrees.push(0);
        Ok(idx)
    }

    /// Add an edge between existing nodes. Endpoints must already be
    /// present; dangling references are rejected.
    pub fn add_edge(&mut self, source: &str, target: &str, attrs: AttrMap) -> GraphResult<()> {
        let source_idx = self
            .node_index(source)
            .ok_or_else(|| GraphError::UnknownSource(source.to_string()))?;
        let target_idx = self
            .node_index(target)
            .ok_or_else(|| GraphError::UnknownTarget(target.to_string()))?;

        self.edges.push(EdgeRecord {
            source: source_idx,
            target: target_idx,
            attrs,
        });

        if self.directed {
            self.out_degrees[source_idx] += 1;
            self.in_degrees[target_idx] += 1;
        } else {
            self.out_degrees[source_idx] += 1;
            self.out_degrees[target_idx] += 1;
        }
        Ok(())
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn node_id(&self, idx: usize) -> Option<&str> {
        self.nodes.get_index(idx).map(|(id, _)| id.as_str())
    }

    pub fn node_attrs(&self, id: &str) -> Option<&AttrMap> {
        self.nodes.get(id)
    }

    /// Node identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Out-degree by node index (directed graphs).
    pub fn out_degree(&self, idx: usize) -> usize {
        if self.directed {
            self.out_degrees[idx]
        } else {
            self.degree(idx)
        }
    }

    /// In-degree by node index (directed graphs).
    pub fn in_degree(&self, idx: usize) -> usize {
        if self.directed {
            self.in_degrees[idx]
        } else {
            self.degree(idx)
        }
    }

    /// Total degree by node index: in + out for directed graphs, the
    /// plain degree for undirected ones. This is the single-number
    /// convention used by threshold selection and degree centrality.
    pub fn degree(&self, idx: usize) -> usize {
        if self.directed {
            self.out_degrees[idx] + self.in_degrees[idx]
        } else {
            self.out_degrees[idx]
        }
    }

    /// Maximum total degree over the unrestricted graph; 1 when the graph
    /// has no nodes. Bounds the caller's degree-threshold input.
    pub fn max_total_degree(&self) -> usize {
        (0..self.node_count())
            .map(|idx| self.degree(idx))
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Project the whole graph into a dense analysis view.
    pub fn view(&self) -> GraphView {
        let node_ids: Vec<String> = self.nodes.keys().cloned().collect();
        let edges = self.edges.iter().map(|e| (e.source, e.target)).collect();
        GraphView::from_edges(self.directed, node_ids, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut g = Graph::new(true);
        for id in ["a", "b", "c"] {
            g.add_node(id, AttrMap::new()).unwrap();
        }
        g.add_edge("a", "b", AttrMap::new()).unwrap();
        g.add_edge("b", "c", AttrMap::new()).unwrap();
        g.add_edge("a", "c", AttrMap::new()).unwrap();
        g
    }

    #[test]
    fn test_degrees() {
        let g = sample();
        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.in_degree(2), 2);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.max_total_degree(), 2);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut g = Graph::new(false);
        g.add_node("a", AttrMap::new()).unwrap();
        assert_eq!(
            g.add_node("a", AttrMap::new()),
            Err(GraphError::DuplicateNode("a".to_string()))
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut g = Graph::new(false);
        g.add_node("a", AttrMap::new()).unwrap();
        assert_eq!(
            g.add_edge("a", "ghost", AttrMap::new()),
            Err(GraphError::UnknownTarget("ghost".to_string()))
        );
        assert_eq!(
            g.add_edge("ghost", "a", AttrMap::new()),
            Err(GraphError::UnknownSource("ghost".to_string()))
        );
    }

    #[test]
    fn test_empty_graph_degree_bound() {
        let g = Graph::new(true);
        assert_eq!(g.max_total_degree(), 1);
    }

    #[test]
    fn test_view_projection() {
        let g = sample();
        let view = g.view();
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.node_id(0), "a");
        assert_eq!(view.degree(2), 2);
    }
}
