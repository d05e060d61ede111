//! The analysis engine.
//!
//! One request = one synchronous pass: load (memoized) → select →
//! structural metrics → centralities → rankings → visual mapping →
//! render payload. Per-metric failures are isolated; only load and
//! selection errors abort a request. Metric results are memoized per
//! (source signature, subgraph mode) so display-only parameter changes
//! never recompute them.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info, warn};
use wikilens_graph_algorithms::{
    assortativity, average_clustering, betweenness_centrality, closeness_centrality,
    degree_centrality, density, eigenvector_centrality, strongly_connected_components,
    weakly_connected_components, CentralityError, EigenvectorConfig, GraphView,
};

use crate::graph::{GraphSource, LoadError, SourceSignature};
use crate::rank::{top_k, RankingMetric, TOP_K_MAX, TOP_K_MIN};
use crate::report::{
    CentralityKind, CentralityOutcome, CentralitySet, ComponentCounts, DegreeDistribution,
    MetricValue, RankEntry, RankingTable, StructuralReport, UnavailableReason,
};
use crate::select::{self, SelectError, SubgraphMode};
use crate::viz::{visual_mapping, LayoutAlgorithm, RenderPayload, VisualAttributes};

/// Everything the caller chooses per request.
#[derive(Debug, Clone)]
pub struct SelectionParams {
    pub mode: SubgraphMode,
    pub metric: RankingMetric,
    pub top_k: usize,
    pub layout: LayoutAlgorithm,
}

impl Default for SelectionParams {
    fn default() -> Self {
        SelectionParams {
            mode: SubgraphMode::Full,
            metric: RankingMetric::None,
            top_k: 5,
            layout: LayoutAlgorithm::ForceDirected,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Metrics computed once per (graph, view-parameters) pair.
#[derive(Debug)]
pub struct ViewAnalysis {
    pub view: GraphView,
    pub structural: StructuralReport,
    pub centralities: CentralitySet,
}

/// The full product of one request.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub analysis: Arc<ViewAnalysis>,
    /// All four ranking tables, capped at the request's top-k.
    pub rankings: Vec<RankingTable>,
    /// Visual attributes for every node in the view.
    pub visual: FxHashMap<String, VisualAttributes>,
    /// Node/edge list plus styling for the external render adapter.
    pub payload: RenderPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AnalysisKey {
    path: PathBuf,
    signature: SourceSignature,
    mode: SubgraphMode,
}

/// Request-driven analysis engine with explicit memoization.
pub struct AnalysisEngine {
    source: GraphSource,
    memo: LruCache<AnalysisKey, Arc<ViewAnalysis>>,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(16).unwrap())
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        AnalysisEngine {
            source: GraphSource::new(),
            memo: LruCache::new(capacity),
        }
    }

    /// The underlying load cache, for manual invalidation.
    pub fn source_mut(&mut self) -> &mut GraphSource {
        &mut self.source
    }

    /// Run one analysis request.
    pub fn analyze(&mut self, path: &Path, params: &SelectionParams) -> EngineResult<AnalysisOutput> {
        let top_k = params.top_k.clamp(TOP_K_MIN, TOP_K_MAX);
        let (graph, signature) = self.source.load(path)?;

        let key = AnalysisKey {
            path: path.to_path_buf(),
            signature,
            mode: params.mode.clone(),
        };

        let analysis = if let Some(hit) = self.memo.get(&key) {
            debug!(mode = ?params.mode, "analysis memo hit");
            Arc::clone(hit)
        } else {
            let view = select::apply(&graph.view(), &params.mode)?;
            info!(
                nodes = view.node_count,
                edges = view.edge_count(),
                mode = ?params.mode,
                "analyzing view"
            );
            let analysis = Arc::new(ViewAnalysis {
                structural: structural_report(&view),
                centralities: centrality_set(&view),
                view,
            });
            self.memo.put(key, Arc::clone(&analysis));
            analysis
        };

        let rankings = ranking_tables(&analysis.centralities, &analysis.view, top_k);
        let visual = request_visual(&analysis, params.metric, top_k);
        let payload = RenderPayload::new(&analysis.view, &visual, params.layout);

        Ok(AnalysisOutput {
            analysis,
            rankings,
            visual,
            payload,
        })
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar descriptors for a view.
fn structural_report(view: &GraphView) -> StructuralReport {
    let components = if view.directed {
        ComponentCounts::Directed {
            strongly_connected: strongly_connected_components(view).len(),
            weakly_connected: weakly_connected_components(view).len(),
        }
    } else {
        ComponentCounts::Undirected {
            connected: weakly_connected_components(view).len(),
        }
    };

    StructuralReport {
        node_count: view.node_count,
        edge_count: view.edge_count(),
        directed: view.directed,
        density: density(view),
        assortativity: MetricValue::from_option(
            assortativity(view),
            UnavailableReason::DegenerateDegreeSequence,
        ),
        clustering: MetricValue::from_option(
            average_clustering(view),
            UnavailableReason::DirectedView,
        ),
        components,
        degrees: DegreeDistribution::from_view(view),
    }
}

/// The four centralities. Each computation stands alone; eigenvector
/// non-convergence is recorded as an unavailable outcome and the rest
/// are reported regardless.
fn centrality_set(view: &GraphView) -> CentralitySet {
    let eigenvector = match eigenvector_centrality(view, &EigenvectorConfig::default()) {
        Ok(scores) => CentralityOutcome::Scores(scores),
        Err(err) => {
            warn!(%err, "eigenvector centrality unavailable");
            let reason = match err {
                CentralityError::EmptyView => UnavailableReason::EmptyView,
                CentralityError::NotConverged { .. } => UnavailableReason::NotConverged,
            };
            CentralityOutcome::Unavailable(reason)
        }
    };

    CentralitySet {
        degree: CentralityOutcome::Scores(degree_centrality(view)),
        closeness: CentralityOutcome::Scores(closeness_centrality(view)),
        betweenness: CentralityOutcome::Scores(betweenness_centrality(view)),
        eigenvector,
    }
}

/// Top-k tables for all four centralities.
fn ranking_tables(set: &CentralitySet, view: &GraphView, k: usize) -> Vec<RankingTable> {
    CentralityKind::ALL
        .iter()
        .map(|&metric| match set.get(metric) {
            CentralityOutcome::Scores(scores) => {
                let rows = top_k(scores, k)
                    .into_iter()
                    .map(|idx| RankEntry {
                        node: view.node_id(idx).to_string(),
                        score: scores[idx],
                    })
                    .collect();
                RankingTable::Ranked { metric, rows }
            }
            CentralityOutcome::Unavailable(reason) => RankingTable::Unavailable {
                metric,
                reason: *reason,
            },
        })
        .collect()
}

/// Visual attributes for the request's highlight choice. With no metric
/// selected — or the chosen one unavailable — every node keeps the plain
/// default style.
fn request_visual(
    analysis: &ViewAnalysis,
    metric: RankingMetric,
    k: usize,
) -> FxHashMap<String, VisualAttributes> {
    let scores = metric
        .kind()
        .and_then(|kind| analysis.centralities.get(kind).scores());

    match scores {
        Some(scores) => {
            let highlighted = top_k(scores, k);
            visual_mapping(&analysis.view, scores, &highlighted)
        }
        None => (0..analysis.view.node_count)
            .map(|idx| {
                (
                    analysis.view.node_id(idx).to_string(),
                    VisualAttributes::plain(),
                )
            })
            .collect(),
    }
}
