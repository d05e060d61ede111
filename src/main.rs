use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use wikilens::engine::{AnalysisEngine, SelectionParams};
use wikilens::rank::RankingMetric;
use wikilens::report::{
    ComponentCounts, DegreeDistribution, MetricValue, RankingTable, StructuralMetric,
    StructuralReport,
};
use wikilens::select::SubgraphMode;
use wikilens::viz::LayoutAlgorithm;

/// Analyze and visually map a wiki relationship graph.
#[derive(Parser)]
#[command(name = "wikilens", version, about)]
struct Cli {
    /// Graph file (JSON node/edge list)
    graph: PathBuf,

    /// Subgraph to analyze
    #[arg(long, value_enum, default_value = "full")]
    subgraph: SubgraphArg,

    /// Minimum total degree for --subgraph degree-threshold
    #[arg(long, default_value_t = 1)]
    min_degree: usize,

    /// Centrality to highlight in the visual mapping
    #[arg(long, default_value = "none")]
    metric: RankingMetric,

    /// Rows per ranking table (1-20)
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Layout hint passed through to the renderer
    #[arg(long, default_value = "force-directed")]
    layout: LayoutAlgorithm,

    /// Write the render payload as JSON to this file
    #[arg(long)]
    payload_out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SubgraphArg {
    Full,
    LargestComponent,
    DegreeThreshold,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let graph = wikilens::Graph::load(&cli.graph)?;
    let max_degree = graph.max_total_degree();
    if cli.min_degree > max_degree {
        eprintln!(
            "note: --min-degree {} exceeds the graph's maximum total degree {}",
            cli.min_degree, max_degree
        );
    }

    let mode = match cli.subgraph {
        SubgraphArg::Full => SubgraphMode::Full,
        SubgraphArg::LargestComponent => SubgraphMode::LargestComponent,
        SubgraphArg::DegreeThreshold => SubgraphMode::DegreeThreshold {
            min_degree: cli.min_degree.max(1),
        },
    };

    let mut engine = AnalysisEngine::new();
    let output = engine.analyze(
        &cli.graph,
        &SelectionParams {
            mode,
            metric: cli.metric,
            top_k: cli.top_k,
            layout: cli.layout,
        },
    )?;

    print_structural(&output.analysis.structural);
    print_degrees(&output.analysis.structural.degrees);
    for table in &output.rankings {
        print_ranking(table);
    }

    if let Some(path) = cli.payload_out {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &output.payload)?;
        println!("render payload written to {}", path.display());
    }

    Ok(())
}

fn print_metric(metric: StructuralMetric, value: &MetricValue) {
    match value {
        MetricValue::Available(v) => println!("{}: {:.6}", metric.label(), v),
        MetricValue::Unavailable(reason) => {
            println!("{}: unavailable ({})", metric.label(), reason.describe())
        }
    }
    println!("  {}", metric.description());
}

fn print_structural(report: &StructuralReport) {
    println!("== Metrics ==");
    println!(
        "{} nodes, {} edges ({})",
        report.node_count,
        report.edge_count,
        if report.directed {
            "directed"
        } else {
            "undirected"
        }
    );
    println!("{}: {:.6}", StructuralMetric::Density.label(), report.density);
    println!("  {}", StructuralMetric::Density.description());
    print_metric(StructuralMetric::Assortativity, &report.assortativity);
    print_metric(StructuralMetric::Clustering, &report.clustering);

    match report.components {
        ComponentCounts::Directed {
            strongly_connected,
            weakly_connected,
        } => {
            println!(
                "{}: {}",
                StructuralMetric::StronglyConnectedComponents.label(),
                strongly_connected
            );
            println!(
                "  {}",
                StructuralMetric::StronglyConnectedComponents.description()
            );
            println!(
                "{}: {}",
                StructuralMetric::WeaklyConnectedComponents.label(),
                weakly_connected
            );
            println!(
                "  {}",
                StructuralMetric::WeaklyConnectedComponents.description()
            );
        }
        ComponentCounts::Undirected { connected } => {
            println!("Connected components: {connected}");
        }
    }
    println!();
}

fn print_degrees(degrees: &DegreeDistribution) {
    println!("== Degree distribution ==");
    match degrees {
        DegreeDistribution::Directed {
            in_degrees,
            out_degrees,
        } => {
            println!("in-degree:  {}", histogram_line(in_degrees));
            println!("out-degree: {}", histogram_line(out_degrees));
        }
        DegreeDistribution::Undirected { degrees } => {
            println!("degree: {}", histogram_line(degrees));
        }
    }
    println!();
}

fn histogram_line(counts: &std::collections::BTreeMap<usize, usize>) -> String {
    counts
        .iter()
        .map(|(degree, count)| format!("{degree}x{count}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_ranking(table: &RankingTable) {
    match table {
        RankingTable::Ranked { metric, rows } => {
            println!("Top {} nodes by {}:", rows.len(), metric.label());
            println!("  {}", metric.description());
            let mut out = Table::new();
            out.load_preset(UTF8_FULL);
            out.set_header(vec!["Node", "Score"]);
            for row in rows {
                out.add_row(vec![
                    Cell::new(&row.node),
                    Cell::new(format!("{:.6}", row.score)),
                ]);
            }
            println!("{out}");
        }
        RankingTable::Unavailable { metric, reason } => {
            println!(
                "{} centrality not available: {}.",
                metric.label(),
                reason.describe()
            );
        }
    }
    println!();
}
