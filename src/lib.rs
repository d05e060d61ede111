//! WikiLens — graph analytics and visual mapping for wiki relationship
//! graphs.
//!
//! An analyst loads one relationship graph (exported from a wiki-style
//! knowledge base), derives a working subgraph, and explores it: global
//! structural metrics, degree distribution, four competing
//! node-importance rankings, and a normalized size/color encoding of the
//! top-ranked nodes for an external renderer.
//!
//! # Pipeline
//!
//! Graph model → subgraph selector → {structural metrics, centrality
//! engine} → ranking & visual mapping → render adapter (external).
//! Everything is synchronous and request-driven; metrics that cannot be
//! computed for a view are reported as typed unavailable states, never
//! silent gaps.
//!
//! # Example
//!
//! ```no_run
//! use wikilens::engine::{AnalysisEngine, SelectionParams};
//! use wikilens::rank::RankingMetric;
//! use wikilens::select::SubgraphMode;
//!
//! let mut engine = AnalysisEngine::new();
//! let output = engine.analyze(
//!     "data/rpg-wiki.json".as_ref(),
//!     &SelectionParams {
//!         mode: SubgraphMode::LargestComponent,
//!         metric: RankingMetric::Betweenness,
//!         top_k: 10,
//!         ..SelectionParams::default()
//!     },
//! )?;
//!
//! println!("density: {}", output.analysis.structural.density);
//! # Ok::<(), wikilens::engine::EngineError>(())
//! ```

pub mod engine;
pub mod graph;
pub mod rank;
pub mod report;
pub mod select;
pub mod viz;

pub use engine::{AnalysisEngine, AnalysisOutput, EngineError, SelectionParams, ViewAnalysis};
pub use graph::{AttrMap, AttrValue, Graph, GraphSource, LoadError};
pub use rank::{RankingMetric, TOP_K_MAX, TOP_K_MIN};
pub use report::{
    CentralityKind, CentralityOutcome, CentralitySet, ComponentCounts, DegreeDistribution,
    MetricValue, RankEntry, RankingTable, StructuralMetric, StructuralReport, UnavailableReason,
};
pub use select::{SelectError, SubgraphMode};
pub use viz::{LayoutAlgorithm, RenderPayload, Rgb, VisualAttributes};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
