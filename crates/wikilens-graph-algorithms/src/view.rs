//! Dense, read-only view of a graph's topology.
//!
//! Algorithms iterate nodes and edges far more often than they look up
//! individual identifiers, so the view maps node ids to dense indices
//! (0..N) and stores adjacency in Compressed Sparse Row (CSR) form.

use std::collections::HashMap;

/// A dense, integer-indexed snapshot of graph topology.
///
/// The view owns its data: it is derived from a graph (or from another
/// view) and never mutates its source. Undirected edges are stored once in
/// `edges` but symmetrized in the adjacency arrays, so `successors` always
/// yields every neighbor reachable in one hop.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Whether edges are directed
    pub directed: bool,
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to the node identifier
    pub index_to_node: Vec<String>,
    /// Mapping from node identifier to dense index
    pub node_to_index: HashMap<String, usize>,
    /// Logical edge list, one entry per loaded edge
    pub edges: Vec<(usize, usize)>,

    /// Offsets into `out_targets`. Size = node_count + 1
    out_offsets: Vec<usize>,
    /// Contiguous array of successor indices
    out_targets: Vec<usize>,
    /// Offsets into `in_sources`. Size = node_count + 1
    in_offsets: Vec<usize>,
    /// Contiguous array of predecessor indices
    in_sources: Vec<usize>,
}

impl GraphView {
    /// Build a view from node identifiers and an edge list over dense
    /// indices. Node order is preserved; it is the deterministic
    /// enumeration order used by every downstream computation.
    pub fn from_edges(directed: bool, node_ids: Vec<String>, edges: Vec<(usize, usize)>) -> Self {
        let node_count = node_ids.len();

        let mut node_to_index = HashMap::with_capacity(node_count);
        for (idx, id) in node_ids.iter().enumerate() {
            node_to_index.insert(id.clone(), idx);
        }

        // 1. Adjacency lists (intermediate step)
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for &(u, v) in &edges {
            outgoing[u].push(v);
            incoming[v].push(u);
            if !directed && u != v {
                outgoing[v].push(u);
                incoming[u].push(v);
            }
        }

        // 2. Flatten to CSR
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            directed,
            node_count,
            index_to_node: node_ids,
            node_to_index,
            edges,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Number of logical edges (undirected edges counted once).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node identifier for a dense index.
    pub fn node_id(&self, idx: usize) -> &str {
        &self.index_to_node[idx]
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Total degree of a node: in + out for directed views, the plain
    /// degree for undirected ones (the adjacency is already symmetric).
    pub fn degree(&self, idx: usize) -> usize {
        if self.directed {
            self.in_degree(idx) + self.out_degree(idx)
        } else {
            self.out_degree(idx)
        }
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Derive the node-induced subview for a set of dense indices.
    ///
    /// `keep` must be ascending; relative node order is preserved, which
    /// keeps selection composable and deterministic. Edges survive only
    /// when both endpoints survive.
    pub fn induced(&self, keep: &[usize]) -> GraphView {
        debug_assert!(keep.windows(2).all(|w| w[0] < w[1]));

        let mut remap = vec![usize::MAX; self.node_count];
        let mut node_ids = Vec::with_capacity(keep.len());
        for (new_idx, &old_idx) in keep.iter().enumerate() {
            remap[old_idx] = new_idx;
            node_ids.push(self.index_to_node[old_idx].clone());
        }

        let edges = self
            .edges
            .iter()
            .filter(|&&(u, v)| remap[u] != usize::MAX && remap[v] != usize::MAX)
            .map(|&(u, v)| (remap[u], remap[v]))
            .collect();

        GraphView::from_edges(self.directed, node_ids, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_directed_degrees() {
        // a -> b -> c, a -> c
        let view = GraphView::from_edges(true, ids(&["a", "b", "c"]), vec![(0, 1), (1, 2), (0, 2)]);

        assert_eq!(view.out_degree(0), 2);
        assert_eq!(view.in_degree(0), 0);
        assert_eq!(view.degree(0), 2);
        assert_eq!(view.degree(2), 2);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.predecessors(2), &[1, 0]);
    }

    #[test]
    fn test_undirected_symmetry() {
        let view = GraphView::from_edges(false, ids(&["a", "b", "c"]), vec![(0, 1), (1, 2)]);

        assert_eq!(view.edge_count(), 2);
        assert_eq!(view.degree(1), 2);
        assert_eq!(view.successors(1), &[0, 2]);
        assert_eq!(view.predecessors(1), view.successors(1));
    }

    #[test]
    fn test_induced_subview() {
        // a -> b -> c, c -> a; keep {a, c}
        let view = GraphView::from_edges(true, ids(&["a", "b", "c"]), vec![(0, 1), (1, 2), (2, 0)]);
        let sub = view.induced(&[0, 2]);

        assert_eq!(sub.node_count, 2);
        assert_eq!(sub.index_to_node, ids(&["a", "c"]));
        // Only c -> a survives
        assert_eq!(sub.edges, vec![(1, 0)]);
        assert_eq!(sub.node_to_index["c"], 1);
    }
}
