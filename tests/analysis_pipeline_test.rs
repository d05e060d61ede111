//! End-to-end pipeline tests over small, hand-checked graphs.

use std::io::Write;
use std::path::Path;

use wikilens::engine::{AnalysisEngine, SelectionParams};
use wikilens::rank::RankingMetric;
use wikilens::report::{
    CentralityKind, CentralityOutcome, ComponentCounts, MetricValue, RankingTable,
    UnavailableReason,
};
use wikilens::select::SubgraphMode;
use wikilens::viz::LayoutAlgorithm;

/// The five-node directed graph: A→B→C, A→C, D isolated, E→D.
const FIVE_NODES: &str = r#"{
    "directed": true,
    "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}, {"id": "D"}, {"id": "E"}],
    "edges": [
        {"source": "A", "target": "B"},
        {"source": "B", "target": "C"},
        {"source": "A", "target": "C"},
        {"source": "E", "target": "D"}
    ]
}"#;

fn write_graph(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn analyze(path: &Path, params: SelectionParams) -> wikilens::engine::AnalysisOutput {
    AnalysisEngine::new().analyze(path, &params).unwrap()
}

#[test]
fn five_node_full_view_metrics() {
    let file = write_graph(FIVE_NODES);
    let output = analyze(file.path(), SelectionParams::default());
    let report = &output.analysis.structural;

    assert_eq!(report.node_count, 5);
    assert_eq!(report.edge_count, 4);
    assert!(report.directed);
    // 4 edges over 5*4 possible
    assert!((report.density - 0.2).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&report.density));

    // Clustering must be skipped for the directed view, not misreported.
    assert_eq!(
        report.clustering,
        MetricValue::Unavailable(UnavailableReason::DirectedView)
    );

    // No cycles: every SCC is a singleton; weak components are
    // {A,B,C} and {D,E}.
    assert_eq!(
        report.components,
        ComponentCounts::Directed {
            strongly_connected: 5,
            weakly_connected: 2,
        }
    );
}

#[test]
fn five_node_degree_threshold_uses_total_degree() {
    let file = write_graph(FIVE_NODES);
    let output = analyze(
        file.path(),
        SelectionParams {
            mode: SubgraphMode::DegreeThreshold { min_degree: 2 },
            ..SelectionParams::default()
        },
    );

    // Total in+out degrees: A=2, B=2, C=2, D=1, E=1.
    let ids: Vec<_> = output
        .analysis
        .view
        .index_to_node
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, ["A", "B", "C"]);
}

#[test]
fn five_node_threshold_is_monotonic() {
    let file = write_graph(FIVE_NODES);
    let mut engine = AnalysisEngine::new();

    let mut sizes = Vec::new();
    for min_degree in 1..=3 {
        let output = engine
            .analyze(
                file.path(),
                &SelectionParams {
                    mode: SubgraphMode::DegreeThreshold { min_degree },
                    ..SelectionParams::default()
                },
            )
            .unwrap();
        sizes.push(output.analysis.view.node_count);
    }

    assert_eq!(sizes, vec![5, 3, 0]);
    assert!(sizes.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn eigenvector_unavailable_leaves_other_centralities_intact() {
    // The DAG's adjacency is nilpotent: power iteration collapses.
    let file = write_graph(FIVE_NODES);
    let output = analyze(file.path(), SelectionParams::default());
    let set = &output.analysis.centralities;

    assert_eq!(
        set.eigenvector,
        CentralityOutcome::Unavailable(UnavailableReason::NotConverged)
    );
    for kind in [
        CentralityKind::Degree,
        CentralityKind::Closeness,
        CentralityKind::Betweenness,
    ] {
        let scores = set.get(kind).scores().expect("centrality computed");
        assert_eq!(scores.len(), 5);
    }

    // The unavailable state surfaces as an explicit table marker.
    let eigen_table = output
        .rankings
        .iter()
        .find(|t| t.metric() == CentralityKind::Eigenvector)
        .unwrap();
    assert!(matches!(eigen_table, RankingTable::Unavailable { .. }));
}

#[test]
fn five_node_degree_centrality_values() {
    let file = write_graph(FIVE_NODES);
    let output = analyze(file.path(), SelectionParams::default());
    let scores = output
        .analysis
        .centralities
        .get(CentralityKind::Degree)
        .scores()
        .unwrap();

    // degree / (n-1) with n = 5
    assert!((scores[0] - 0.5).abs() < 1e-12); // A: 2/4
    assert!((scores[3] - 0.25).abs() < 1e-12); // D: 1/4
}

#[test]
fn undirected_clustering_is_defined() {
    let triangle_plus_tail = write_graph(
        r#"{
            "directed": false,
            "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}],
            "edges": [
                {"source": "a", "target": "b"},
                {"source": "b", "target": "c"},
                {"source": "c", "target": "a"},
                {"source": "c", "target": "d"}
            ]
        }"#,
    );
    let output = analyze(triangle_plus_tail.path(), SelectionParams::default());
    let clustering = output.analysis.structural.clustering;
    assert!(clustering.is_available());
    // a and b close their triangle (1.0); c has 3 neighbors and one
    // closed pair (1/3); d has degree 1 (0). Average = 7/12.
    assert!((clustering.value().unwrap() - 7.0 / 12.0).abs() < 1e-9);
}

#[test]
fn largest_component_picks_maximal_and_deterministic() {
    let two_islands = write_graph(
        r#"{
            "directed": false,
            "nodes": [{"id": "a"}, {"id": "b"}, {"id": "x"}, {"id": "y"}, {"id": "z"}],
            "edges": [
                {"source": "a", "target": "b"},
                {"source": "x", "target": "y"},
                {"source": "y", "target": "z"}
            ]
        }"#,
    );
    let output = analyze(
        two_islands.path(),
        SelectionParams {
            mode: SubgraphMode::LargestComponent,
            ..SelectionParams::default()
        },
    );

    let ids: Vec<_> = output
        .analysis
        .view
        .index_to_node
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, ["x", "y", "z"]);
}

#[test]
fn render_payload_reflects_ranking_and_layout() {
    let file = write_graph(FIVE_NODES);
    let output = analyze(
        file.path(),
        SelectionParams {
            metric: RankingMetric::Degree,
            top_k: 2,
            layout: LayoutAlgorithm::Hierarchical,
            ..SelectionParams::default()
        },
    );

    let payload = &output.payload;
    assert!(payload.directed);
    assert_eq!(payload.nodes.len(), 5);
    assert_eq!(payload.edges.len(), 4);

    let json = serde_json::to_value(payload).unwrap();
    assert_eq!(json["layout"], "hierarchical");

    // Ties at degree 2 rank in node order: A then B are highlighted,
    // both at the midpoint size; the rest keep the neutral style.
    let a = payload.nodes.iter().find(|n| n.id == "A").unwrap();
    let d = payload.nodes.iter().find(|n| n.id == "D").unwrap();
    assert_eq!(a.size, 25.0);
    assert_eq!(d.size, 8.0);
    assert_eq!(d.color, "#d3d3d3");
}

#[test]
fn load_failure_is_recoverable() {
    let mut engine = AnalysisEngine::new();
    let err = engine
        .analyze(Path::new("/nonexistent/wiki.json"), &SelectionParams::default())
        .unwrap_err();
    assert!(matches!(err, wikilens::engine::EngineError::Load(_)));

    // The engine is still usable after a failed load.
    let file = write_graph(FIVE_NODES);
    assert!(engine.analyze(file.path(), &SelectionParams::default()).is_ok());
}

#[test]
fn empty_graph_largest_component_is_select_error() {
    let empty = write_graph(r#"{"directed": true, "nodes": [], "edges": []}"#);
    let mut engine = AnalysisEngine::new();
    let err = engine
        .analyze(
            empty.path(),
            &SelectionParams {
                mode: SubgraphMode::LargestComponent,
                ..SelectionParams::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, wikilens::engine::EngineError::Select(_)));
}
