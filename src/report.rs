//! Analysis report types.
//!
//! Metrics that cannot be computed for a view are first-class values
//! here, never swallowed faults: a caller can always distinguish
//! "computed, value is X" from "not computable, and why".

use std::collections::BTreeMap;

use serde::Serialize;
use wikilens_graph_algorithms::GraphView;

/// Why a metric is unavailable for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The metric is only defined for undirected views.
    DirectedView,
    /// Zero-variance or empty degree sequence.
    DegenerateDegreeSequence,
    /// Power iteration exhausted its bound without converging.
    NotConverged,
    /// The view has no nodes.
    EmptyView,
}

impl UnavailableReason {
    pub fn describe(&self) -> &'static str {
        match self {
            UnavailableReason::DirectedView => "only defined for undirected graphs",
            UnavailableReason::DegenerateDegreeSequence => {
                "degree sequence has no variance to correlate"
            }
            UnavailableReason::NotConverged => "iteration did not converge within its bound",
            UnavailableReason::EmptyView => "the selected subgraph has no nodes",
        }
    }
}

/// A scalar metric outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Available(f64),
    Unavailable(UnavailableReason),
}

impl MetricValue {
    pub fn from_option(value: Option<f64>, reason: UnavailableReason) -> Self {
        match value {
            Some(v) => MetricValue::Available(v),
            None => MetricValue::Unavailable(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MetricValue::Available(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Available(v) => Some(*v),
            MetricValue::Unavailable(_) => None,
        }
    }
}

/// Per-degree node counts for the analyzed view. Directed views get
/// separate in/out histograms, matching how the distribution is
/// displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DegreeDistribution {
    Directed {
        in_degrees: BTreeMap<usize, usize>,
        out_degrees: BTreeMap<usize, usize>,
    },
    Undirected {
        degrees: BTreeMap<usize, usize>,
    },
}

impl DegreeDistribution {
    pub fn from_view(view: &GraphView) -> Self {
        if view.directed {
            let mut in_degrees = BTreeMap::new();
            let mut out_degrees = BTreeMap::new();
            for idx in 0..view.node_count {
                *in_degrees.entry(view.in_degree(idx)).or_insert(0) += 1;
                *out_degrees.entry(view.out_degree(idx)).or_insert(0) += 1;
            }
            DegreeDistribution::Directed {
                in_degrees,
                out_degrees,
            }
        } else {
            let mut degrees = BTreeMap::new();
            for idx in 0..view.node_count {
                *degrees.entry(view.degree(idx)).or_insert(0) += 1;
            }
            DegreeDistribution::Undirected { degrees }
        }
    }
}

/// Component counts for the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ComponentCounts {
    Directed {
        strongly_connected: usize,
        weakly_connected: usize,
    },
    Undirected {
        connected: usize,
    },
}

/// Scalar descriptors of the analyzed view.
#[derive(Debug, Clone, Serialize)]
pub struct StructuralReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub density: f64,
    pub assortativity: MetricValue,
    pub clustering: MetricValue,
    pub components: ComponentCounts,
    pub degrees: DegreeDistribution,
}

/// The four competing importance rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityKind {
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
}

impl CentralityKind {
    pub const ALL: [CentralityKind; 4] = [
        CentralityKind::Degree,
        CentralityKind::Closeness,
        CentralityKind::Betweenness,
        CentralityKind::Eigenvector,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CentralityKind::Degree => "Degree",
            CentralityKind::Closeness => "Closeness",
            CentralityKind::Betweenness => "Betweenness",
            CentralityKind::Eigenvector => "Eigenvector",
        }
    }

    /// One-line caption shown next to the ranking table.
    pub fn description(&self) -> &'static str {
        match self {
            CentralityKind::Degree => "How many direct connections a node has, relative to n-1.",
            CentralityKind::Closeness => {
                "How near a node sits to everything it can reach, by shortest paths."
            }
            CentralityKind::Betweenness => {
                "How often a node lies on shortest paths between other nodes."
            }
            CentralityKind::Eigenvector => {
                "Importance earned by being linked from other important nodes."
            }
        }
    }
}

/// Scalar structural metrics, for captions and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralMetric {
    Density,
    Assortativity,
    Clustering,
    StronglyConnectedComponents,
    WeaklyConnectedComponents,
}

impl StructuralMetric {
    pub fn label(&self) -> &'static str {
        match self {
            StructuralMetric::Density => "Density",
            StructuralMetric::Assortativity => "Assortativity",
            StructuralMetric::Clustering => "Clustering coefficient",
            StructuralMetric::StronglyConnectedComponents => "Strongly connected components",
            StructuralMetric::WeaklyConnectedComponents => "Weakly connected components",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StructuralMetric::Density => {
                "Share of possible edges that actually exist; how full the graph is."
            }
            StructuralMetric::Assortativity => {
                "Whether nodes tend to connect to nodes of similar degree."
            }
            StructuralMetric::Clustering => {
                "Tendency of neighborhoods to close into triangles."
            }
            StructuralMetric::StronglyConnectedComponents => {
                "Subgraphs where every node reaches every other along edge directions."
            }
            StructuralMetric::WeaklyConnectedComponents => {
                "Subgraphs that stay connected when edge direction is ignored."
            }
        }
    }
}

/// One centrality over the view: a total score vector (indexed like the
/// view's nodes) or an unavailable marker for the whole view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityOutcome {
    Scores(Vec<f64>),
    Unavailable(UnavailableReason),
}

impl CentralityOutcome {
    pub fn scores(&self) -> Option<&[f64]> {
        match self {
            CentralityOutcome::Scores(s) => Some(s),
            CentralityOutcome::Unavailable(_) => None,
        }
    }
}

/// All four centralities, computed independently.
#[derive(Debug, Clone, Serialize)]
pub struct CentralitySet {
    pub degree: CentralityOutcome,
    pub closeness: CentralityOutcome,
    pub betweenness: CentralityOutcome,
    pub eigenvector: CentralityOutcome,
}

impl CentralitySet {
    pub fn get(&self, kind: CentralityKind) -> &CentralityOutcome {
        match kind {
            CentralityKind::Degree => &self.degree,
            CentralityKind::Closeness => &self.closeness,
            CentralityKind::Betweenness => &self.betweenness,
            CentralityKind::Eigenvector => &self.eigenvector,
        }
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub node: String,
    pub score: f64,
}

/// A top-k table for one centrality, or an explicit unavailable marker —
/// never a silent empty table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingTable {
    Ranked {
        metric: CentralityKind,
        rows: Vec<RankEntry>,
    },
    Unavailable {
        metric: CentralityKind,
        reason: UnavailableReason,
    },
}

impl RankingTable {
    pub fn metric(&self) -> CentralityKind {
        match self {
            RankingTable::Ranked { metric, .. } | RankingTable::Unavailable { metric, .. } => {
                *metric
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_value_states() {
        let v = MetricValue::from_option(Some(0.25), UnavailableReason::DirectedView);
        assert!(v.is_available());
        assert_eq!(v.value(), Some(0.25));

        let u = MetricValue::from_option(None, UnavailableReason::DegenerateDegreeSequence);
        assert!(!u.is_available());
        assert_eq!(u.value(), None);
    }

    #[test]
    fn test_every_metric_has_a_caption() {
        for kind in CentralityKind::ALL {
            assert!(!kind.description().is_empty());
        }
        assert!(!StructuralMetric::Assortativity.description().is_empty());
    }

    #[test]
    fn test_degree_distribution_directed() {
        // a -> b, a -> c
        let view = GraphView::from_edges(
            true,
            vec!["a".into(), "b".into(), "c".into()],
            vec![(0, 1), (0, 2)],
        );
        match DegreeDistribution::from_view(&view) {
            DegreeDistribution::Directed {
                in_degrees,
                out_degrees,
            } => {
                assert_eq!(in_degrees[&0], 1);
                assert_eq!(in_degrees[&1], 2);
                assert_eq!(out_degrees[&2], 1);
                assert_eq!(out_degrees[&0], 2);
            }
            DegreeDistribution::Undirected { .. } => panic!("expected directed histograms"),
        }
    }

    #[test]
    fn test_serialized_unavailable_is_explicit() {
        let table = RankingTable::Unavailable {
            metric: CentralityKind::Eigenvector,
            reason: UnavailableReason::NotConverged,
        };
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("unavailable"));
        assert!(json.contains("not_converged"));
    }
}
