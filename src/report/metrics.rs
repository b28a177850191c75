//! Per-round partition quality metrics.

use crate::graph::Graph;

/// What a round leaves behind: edge cut, running swap total and migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundMetrics {
    /// 0-based index of the completed round.
    pub round: usize,
    /// Undirected edges whose endpoints hold different colors.
    pub edge_cut: usize,
    /// Swaps performed since the run started.
    pub swaps: usize,
    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
}

impl RoundMetrics {
    /// Measures `graph` as it stands after round `round`.
    pub fn compute(graph: &Graph, round: usize, swaps: usize) -> Self {
        Self {
            round,
            edge_cut: gray_links(graph) / 2,
            swaps,
            migrations: migrations(graph),
        }
    }
}

/// Ordered `(node, neighbor)` pairs with differing colors.
///
/// Each cut edge is seen once from each endpoint, so the count is even.
pub fn gray_links(graph: &Graph) -> usize {
    graph
        .nodes()
        .map(|node| {
            node.neighbors()
                .iter()
                .filter(|&&n| graph.color(n) != Some(node.color()))
                .count()
        })
        .sum()
}

/// Undirected cut edges.
pub fn edge_cut(graph: &Graph) -> usize {
    gray_links(graph) / 2
}

/// Nodes currently away from their initial color.
pub fn migrations(graph: &Graph) -> usize {
    graph.nodes().filter(|n| n.has_migrated()).count()
}
