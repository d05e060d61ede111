//! Scalar structural descriptors: density, assortativity, clustering.
//!
//! Assortativity and clustering can be undefined for a given topology;
//! those kernels return `None` and the caller reports the metric as
//! unavailable instead of fabricating a number.

use std::collections::HashSet;

use super::view::GraphView;

/// Edge density: realized edges over the maximum possible for the view's
/// node count and directedness. Defined as 0.0 for fewer than two nodes.
pub fn density(view: &GraphView) -> f64 {
    let n = view.node_count;
    if n <= 1 {
        return 0.0;
    }
    let m = view.edge_count() as f64;
    let pairs = (n * (n - 1)) as f64;
    if view.directed {
        m / pairs
    } else {
        2.0 * m / pairs
    }
}

/// Degree assortativity: Pearson correlation of endpoint degrees over the
/// edge set. Directed views correlate source out-degree with target
/// in-degree; undirected views take both orientations of each edge so the
/// correlation is symmetric.
///
/// Returns `None` when the correlation is undefined: no edges, or a
/// zero-variance degree sequence on either axis.
pub fn assortativity(view: &GraphView) -> Option<f64> {
    if view.edges.is_empty() {
        return None;
    }

    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(view.edges.len() * 2);
    for &(u, v) in &view.edges {
        if view.directed {
            pairs.push((view.out_degree(u) as f64, view.in_degree(v) as f64));
        } else {
            pairs.push((view.degree(u) as f64, view.degree(v) as f64));
            pairs.push((view.degree(v) as f64, view.degree(u) as f64));
        }
    }

    pearson(&pairs)
}

fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
        var_y += (y - mean_y) * (y - mean_y);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Average local clustering coefficient.
///
/// Defined for undirected views only; a directed view returns `None` so
/// the caller can flag the metric as skipped rather than report a
/// misleading number. Nodes with degree < 2 contribute 0.
pub fn average_clustering(view: &GraphView) -> Option<f64> {
    if view.directed {
        return None;
    }
    let n = view.node_count;
    if n == 0 {
        return Some(0.0);
    }

    let neighbor_sets: Vec<HashSet<usize>> = (0..n)
        .map(|v| {
            view.successors(v)
                .iter()
                .copied()
                .filter(|&w| w != v)
                .collect()
        })
        .collect();

    let mut total = 0.0;
    for v in 0..n {
        let neighbors = &neighbor_sets[v];
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        // Closed pairs among v's neighborhood
        let mut links = 0usize;
        for &a in neighbors {
            for &b in neighbors {
                if a < b && neighbor_sets[a].contains(&b) {
                    links += 1;
                }
            }
        }
        total += 2.0 * links as f64 / (k * (k - 1)) as f64;
    }

    Some(total / n as f64)
}
