//! Node centrality kernels: degree, closeness, betweenness, eigenvector.
//!
//! Each kernel is independent. Degree, closeness, and betweenness are
//! total over the view's nodes; eigenvector centrality is iterative and
//! reports a typed error when the power iteration cannot produce a
//! converged vector for the whole view.

use std::collections::VecDeque;

use ndarray::Array1;
use thiserror::Error;

use super::view::GraphView;

/// Why a centrality could not be computed for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CentralityError {
    #[error("view has no nodes")]
    EmptyView,

    #[error("power iteration failed to converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

/// Degree centrality: total degree scaled by 1/(n-1).
///
/// For fewer than two nodes the scale factor is undefined; the
/// conventional all-zero result is returned.
pub fn degree_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    if n < 2 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|v| view.degree(v) as f64 * scale).collect()
}

/// Closeness centrality with reachability normalization.
///
/// For a node u that reaches r nodes (itself included) at total distance
/// d along outgoing edges: ((r-1)/(n-1)) * ((r-1)/d). Nodes that reach
/// nothing score 0.
pub fn closeness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut result = vec![0.0; n];
    if n < 2 {
        return result;
    }

    let mut dist = vec![-1i64; n];
    let mut queue = VecDeque::new();
    for u in 0..n {
        dist.fill(-1);
        dist[u] = 0;
        queue.clear();
        queue.push_back(u);

        let mut reached = 1u64;
        let mut total = 0u64;
        while let Some(v) = queue.pop_front() {
            for &w in view.successors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    reached += 1;
                    total += dist[w] as u64;
                    queue.push_back(w);
                }
            }
        }

        if total > 0 {
            let r = (reached - 1) as f64;
            result[u] = (r / (n - 1) as f64) * (r / total as f64);
        }
    }

    result
}

/// Betweenness centrality, exact Brandes accumulation over BFS
/// shortest-path DAGs. Endpoints are excluded.
///
/// The raw sums count ordered pairs for directed views and each
/// unordered pair twice for undirected ones, so a single factor of
/// 1/((n-1)(n-2)) normalizes both into [0, 1]. Views with fewer than
/// three nodes have no interior pairs and score all zeros.
pub fn betweenness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut bc = vec![0.0; n];
    if n < 3 {
        return bc;
    }

    for s in 0..n {
        // Forward phase: BFS recording path counts and predecessors
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist = vec![-1i64; n];
        sigma[s] = 1.0;
        dist[s] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(s);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in view.successors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        // Backward phase: dependency accumulation in reverse BFS order
        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    for value in bc.iter_mut() {
        *value *= scale;
    }
    bc
}

/// Eigenvector centrality configuration.
#[derive(Debug, Clone)]
pub struct EigenvectorConfig {
    /// Iteration bound for the power method
    pub max_iterations: usize,
    /// Per-node L1 convergence tolerance
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Eigenvector centrality via power iteration on the adjacency relation.
///
/// A node's score accumulates from its in-neighbors (symmetric for
/// undirected views), with L2 renormalization each round. Convergence is
/// an L1 difference below `n * tolerance` within `max_iterations`
/// rounds. Degenerate topologies — an empty view, or an adjacency that
/// annihilates the iterate (edgeless graphs, DAGs) — yield an error for
/// the whole view rather than a partial or zero mapping.
pub fn eigenvector_centrality(
    view: &GraphView,
    config: &EigenvectorConfig,
) -> Result<Vec<f64>, CentralityError> {
    let n = view.node_count;
    if n == 0 {
        return Err(CentralityError::EmptyView);
    }

    let mut x = Array1::from_elem(n, 1.0 / n as f64);
    for iteration in 0..config.max_iterations {
        let mut next = Array1::<f64>::zeros(n);
        for u in 0..n {
            let score = x[u];
            for &v in view.successors(u) {
                next[v] += score;
            }
        }

        let norm = next.dot(&next).sqrt();
        if norm == 0.0 {
            // The iterate left the adjacency's image entirely; no
            // principal eigenvector is recoverable from here.
            return Err(CentralityError::NotConverged {
                iterations: iteration + 1,
            });
        }
        next.mapv_inplace(|v| v / norm);

        let diff = (&next - &x).mapv(f64::abs).sum();
        x = next;
        if diff < config.tolerance * n as f64 {
            return Ok(x.to_vec());
        }
    }

    Err(CentralityError::NotConverged {
        iterations: config.max_iterations,
    })
}
