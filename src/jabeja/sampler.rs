//! Partner sampling.
//!
//! Both samplers draw uniform indices and reject duplicates, so the
//! returned ids keep the order in which they were drawn. That order is
//! the tie-break order used when picking the best partner.

use rand::Rng;

use crate::graph::{Graph, Node, NodeId};

/// Samples up to `size` distinct neighbors of `node`.
///
/// When the node has no more than `size` neighbors all of them are
/// returned, in adjacency order, without consuming any randomness.
pub fn neighbor_sample<R: Rng>(node: &Node, size: usize, rng: &mut R) -> Vec<NodeId> {
    let neighbors = node.neighbors();
    if neighbors.len() <= size {
        return neighbors.to_vec();
    }

    let mut picked = Vec::with_capacity(size);
    while picked.len() < size {
        let candidate = neighbors[rng.random_range(0..neighbors.len())];
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    picked
}

/// Samples up to `size` distinct nodes from the whole graph, never `node` itself.
///
/// The target is capped at the number of eligible nodes, so a request at
/// least as large as the population returns every other node instead of
/// drawing forever.
pub fn global_sample<R: Rng>(graph: &Graph, node: NodeId, size: usize, rng: &mut R) -> Vec<NodeId> {
    let ids = graph.ids();
    let eligible = ids.len() - usize::from(graph.node(node).is_some());
    let target = size.min(eligible);

    let mut picked = Vec::with_capacity(target);
    while picked.len() < target {
        let candidate = ids[rng.random_range(0..ids.len())];
        if candidate != node && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    picked
}
