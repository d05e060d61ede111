//! Visual encoding of rankings.
//!
//! Highlighted nodes get a size from a fixed range and a color from a
//! light-to-dark warm gradient, both driven by the same linear
//! normalization of their scores. Everything else stays in a flat neutral
//! style so the highlights stand out. The mapping is pure: identical
//! inputs always produce identical outputs, and nothing here touches the
//! filesystem or the renderer.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::Serialize;
use wikilens_graph_algorithms::GraphView;

/// Smallest highlight size.
pub const SIZE_MIN: f64 = 10.0;
/// Largest highlight size.
pub const SIZE_MAX: f64 = 40.0;
/// Size of nodes outside the highlight set, below SIZE_MIN on purpose.
pub const NEUTRAL_SIZE: f64 = 8.0;

/// An RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    /// Hex form for web renderers, `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.0 * 255.0).round() as u8,
            (self.1 * 255.0).round() as u8,
            (self.2 * 255.0).round() as u8
        )
    }
}

/// Flat light gray for everything outside the highlight set.
pub const NEUTRAL_COLOR: Rgb = Rgb(0.827, 0.827, 0.827);

/// Size and color for one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualAttributes {
    pub size: f64,
    pub color: Rgb,
}

impl VisualAttributes {
    pub fn neutral() -> Self {
        VisualAttributes {
            size: NEUTRAL_SIZE,
            color: NEUTRAL_COLOR,
        }
    }

    /// Default style when no ranking is highlighted at all.
    pub fn plain() -> Self {
        VisualAttributes {
            size: SIZE_MIN,
            color: NEUTRAL_COLOR,
        }
    }
}

/// Linear map from the value range onto [lo, hi]. A degenerate range
/// (all values equal) maps everything to the midpoint rather than
/// dividing by zero.
pub fn normalize(values: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().reduce(f64::max).unwrap();

    if min == max {
        return vec![(lo + hi) / 2.0; values.len()];
    }
    values
        .iter()
        .map(|v| lo + (v - min) / (max - min) * (hi - lo))
        .collect()
}

/// YlOrRd sequential scale anchors, light to dark.
const WARM_ANCHORS: [Rgb; 9] = [
    Rgb(1.000, 1.000, 0.800),
    Rgb(1.000, 0.929, 0.627),
    Rgb(0.996, 0.851, 0.463),
    Rgb(0.996, 0.698, 0.298),
    Rgb(0.992, 0.553, 0.235),
    Rgb(0.988, 0.306, 0.165),
    Rgb(0.890, 0.102, 0.110),
    Rgb(0.741, 0.000, 0.149),
    Rgb(0.502, 0.000, 0.149),
];

/// Sample the warm sequential scale at t in [0, 1] (clamped), with
/// linear interpolation between anchors.
pub fn warm_scale(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let span = (WARM_ANCHORS.len() - 1) as f64;
    let pos = t * span;
    let low = pos.floor() as usize;
    if low >= WARM_ANCHORS.len() - 1 {
        return WARM_ANCHORS[WARM_ANCHORS.len() - 1];
    }
    let frac = pos - low as f64;
    let a = WARM_ANCHORS[low];
    let b = WARM_ANCHORS[low + 1];
    Rgb(
        a.0 + (b.0 - a.0) * frac,
        a.1 + (b.1 - a.1) * frac,
        a.2 + (b.2 - a.2) * frac,
    )
}

/// Compute the visual encoding for a ranked selection.
///
/// Every node in the view gets an entry: highlighted nodes carry the
/// normalized size and gradient color for their score, the rest the
/// neutral style. With all-equal scores the size falls to the midpoint
/// and the color to the light end of the scale.
pub fn visual_mapping(
    view: &GraphView,
    scores: &[f64],
    highlighted: &[usize],
) -> FxHashMap<String, VisualAttributes> {
    let selected: Vec<f64> = highlighted.iter().map(|&idx| scores[idx]).collect();
    let sizes = normalize(&selected, SIZE_MIN, SIZE_MAX);
    let positions = color_positions(&selected);

    let mut mapping = FxHashMap::default();
    for idx in 0..view.node_count {
        mapping.insert(view.node_id(idx).to_string(), VisualAttributes::neutral());
    }
    for (slot, &idx) in highlighted.iter().enumerate() {
        mapping.insert(
            view.node_id(idx).to_string(),
            VisualAttributes {
                size: sizes[slot],
                color: warm_scale(positions[slot]),
            },
        );
    }
    mapping
}

/// Gradient positions for the selected scores. Unlike sizes, a
/// degenerate score set pins the color to the light end of the scale, so
/// a single highlighted node reads as "lit up" rather than mid-gradient.
fn color_positions(selected: &[f64]) -> Vec<f64> {
    let Some(min) = selected.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = selected.iter().copied().reduce(f64::max).unwrap();
    if min == max {
        return vec![0.0; selected.len()];
    }
    normalize(selected, 0.0, 1.0)
}

/// Layout algorithms understood by the render adapter. Serialized names
/// match the vis-network physics solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutAlgorithm {
    #[serde(rename = "forceAtlas2Based")]
    ForceDirected,
    #[serde(rename = "barnesHut")]
    BarnesHut,
    #[serde(rename = "repulsion")]
    Repulsion,
    #[serde(rename = "hierarchical")]
    Hierarchical,
}

impl FromStr for LayoutAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "force-directed" => Ok(LayoutAlgorithm::ForceDirected),
            "barnes-hut" => Ok(LayoutAlgorithm::BarnesHut),
            "repulsion" => Ok(LayoutAlgorithm::Repulsion),
            "hierarchical" => Ok(LayoutAlgorithm::Hierarchical),
            other => Err(format!(
                "unknown layout `{other}` (expected force-directed, barnes-hut, repulsion or hierarchical)"
            )),
        }
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutAlgorithm::ForceDirected => "force-directed",
            LayoutAlgorithm::BarnesHut => "barnes-hut",
            LayoutAlgorithm::Repulsion => "repulsion",
            LayoutAlgorithm::Hierarchical => "hierarchical",
        };
        write!(f, "{name}")
    }
}

/// One node as handed to the render adapter.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadNode {
    pub id: String,
    pub size: f64,
    pub color: String,
}

/// One edge as handed to the render adapter.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadEdge {
    pub source: String,
    pub target: String,
}

/// Everything the external render adapter needs to draw the view: the
/// node/edge lists with visual attributes and the layout choice. The
/// engine stops here; it never renders or writes files itself.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPayload {
    pub directed: bool,
    pub layout: LayoutAlgorithm,
    pub nodes: Vec<PayloadNode>,
    pub edges: Vec<PayloadEdge>,
}

impl RenderPayload {
    pub fn new(
        view: &GraphView,
        visual: &FxHashMap<String, VisualAttributes>,
        layout: LayoutAlgorithm,
    ) -> Self {
        let nodes = (0..view.node_count)
            .map(|idx| {
                let id = view.node_id(idx);
                let attrs = visual
                    .get(id)
                    .copied()
                    .unwrap_or_else(VisualAttributes::neutral);
                PayloadNode {
                    id: id.to_string(),
                    size: attrs.size,
                    color: attrs.color.to_hex(),
                }
            })
            .collect();

        let edges = view
            .edges
            .iter()
            .map(|&(u, v)| PayloadEdge {
                source: view.node_id(u).to_string(),
                target: view.node_id(v).to_string(),
            })
            .collect();

        RenderPayload {
            directed: view.directed,
            layout,
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view3() -> GraphView {
        GraphView::from_edges(
            false,
            vec!["a".into(), "b".into(), "c".into()],
            vec![(0, 1), (1, 2)],
        )
    }

    #[test]
    fn test_normalize_linear() {
        let out = normalize(&[0.0, 5.0, 10.0], 10.0, 40.0);
        assert_eq!(out, vec![10.0, 25.0, 40.0]);
    }

    #[test]
    fn test_normalize_degenerate_is_midpoint() {
        let out = normalize(&[3.0, 3.0, 3.0], 10.0, 40.0);
        assert_eq!(out, vec![25.0, 25.0, 25.0]);
    }

    #[test]
    fn test_warm_scale_endpoints() {
        assert_eq!(warm_scale(0.0), WARM_ANCHORS[0]);
        assert_eq!(warm_scale(1.0), WARM_ANCHORS[8]);
        assert_eq!(warm_scale(-2.0), WARM_ANCHORS[0]);
        // Interior samples darken monotonically in the blue channel
        assert!(warm_scale(0.2).2 < warm_scale(0.0).2 + 1e-12);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb(1.0, 1.0, 1.0).to_hex(), "#ffffff");
        assert_eq!(Rgb(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(NEUTRAL_COLOR.to_hex(), "#d3d3d3");
    }

    #[test]
    fn test_mapping_highlights_and_neutral() {
        let view = view3();
        let scores = [0.2, 0.8, 0.5];
        let mapping = visual_mapping(&view, &scores, &[1, 2]);

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping["a"], VisualAttributes::neutral());
        assert_eq!(mapping["b"].size, SIZE_MAX);
        assert_eq!(mapping["c"].size, SIZE_MIN);
        // Highest score gets the dark end
        assert_eq!(mapping["b"].color, warm_scale(1.0));
    }

    #[test]
    fn test_single_highlight_midpoint_size_light_color() {
        let view = view3();
        let scores = [0.2, 0.8, 0.5];
        let mapping = visual_mapping(&view, &scores, &[1]);

        assert_eq!(mapping["b"].size, (SIZE_MIN + SIZE_MAX) / 2.0);
        assert_eq!(mapping["b"].color, warm_scale(0.0));
    }

    #[test]
    fn test_mapping_is_pure() {
        let view = view3();
        let scores = [0.2, 0.8, 0.5];
        let first = visual_mapping(&view, &scores, &[1, 2]);
        let second = visual_mapping(&view, &scores, &[1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(
            serde_json::to_string(&LayoutAlgorithm::ForceDirected).unwrap(),
            "\"forceAtlas2Based\""
        );
        assert_eq!(
            serde_json::to_string(&LayoutAlgorithm::BarnesHut).unwrap(),
            "\"barnesHut\""
        );
        assert_eq!("repulsion".parse(), Ok(LayoutAlgorithm::Repulsion));
        assert!("circular".parse::<LayoutAlgorithm>().is_err());
    }

    #[test]
    fn test_payload_carries_view() {
        let view = view3();
        let mapping = visual_mapping(&view, &[0.2, 0.8, 0.5], &[1]);
        let payload = RenderPayload::new(&view, &mapping, LayoutAlgorithm::Hierarchical);

        assert!(!payload.directed);
        assert_eq!(payload.nodes.len(), 3);
        assert_eq!(payload.edges.len(), 2);
        assert_eq!(payload.edges[0].source, "a");
        assert_eq!(payload.nodes[0].color, "#d3d3d3");
    }
}
