//! Top-k ranking over centrality scores.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::report::CentralityKind;

/// Bounds for the top-k parameter.
pub const TOP_K_MIN: usize = 1;
pub const TOP_K_MAX: usize = 20;

/// Which centrality drives the highlight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    None,
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
}

impl RankingMetric {
    pub fn kind(&self) -> Option<CentralityKind> {
        match self {
            RankingMetric::None => None,
            RankingMetric::Degree => Some(CentralityKind::Degree),
            RankingMetric::Closeness => Some(CentralityKind::Closeness),
            RankingMetric::Betweenness => Some(CentralityKind::Betweenness),
            RankingMetric::Eigenvector => Some(CentralityKind::Eigenvector),
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RankingMetric::None => "none",
            RankingMetric::Degree => "degree",
            RankingMetric::Closeness => "closeness",
            RankingMetric::Betweenness => "betweenness",
            RankingMetric::Eigenvector => "eigenvector",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RankingMetric::None),
            "degree" => Ok(RankingMetric::Degree),
            "closeness" => Ok(RankingMetric::Closeness),
            "betweenness" => Ok(RankingMetric::Betweenness),
            "eigenvector" => Ok(RankingMetric::Eigenvector),
            other => Err(format!(
                "unknown ranking metric `{other}` (expected none, degree, closeness, betweenness or eigenvector)"
            )),
        }
    }
}

/// Indices of the top-k scores, descending. Ties break by ascending node
/// index, so equal scores rank in the view's deterministic node order.
pub fn top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    order.truncate(k.min(scores.len()));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_descending() {
        let scores = [0.1, 0.9, 0.5, 0.7];
        assert_eq!(top_k(&scores, 2), vec![1, 3]);
        assert_eq!(top_k(&scores, 10), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_ties_break_by_node_order() {
        let scores = [0.5, 0.5, 0.9, 0.5];
        assert_eq!(top_k(&scores, 3), vec![2, 0, 1]);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("betweenness".parse(), Ok(RankingMetric::Betweenness));
        assert_eq!("none".parse(), Ok(RankingMetric::None));
        assert!("pagerank".parse::<RankingMetric>().is_err());
    }
}
