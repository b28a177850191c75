//! Graph store: nodes, colors and adjacency.

use std::collections::{BTreeMap, BTreeSet};

use super::coloring::InitialColorPolicy;
use crate::error::{JabejaError, Result};

/// Node identifier.
pub type NodeId = u32;

/// Partition label held by a node.
pub type Color = u32;

/// A graph vertex with a mutable color and a fixed neighbor list.
///
/// The neighbor list never changes once the node is built; only the
/// current color is mutated by swaps. The initial color is captured at
/// construction and is used to count migrations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    color: Color,
    initial_color: Color,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node whose initial color equals `color`.
    ///
    /// Duplicate neighbor ids and self-references are discarded; the
    /// remaining ids keep their first-seen order.
    pub fn new(id: NodeId, color: Color, neighbors: impl IntoIterator<Item = NodeId>) -> Self {
        let mut seen = BTreeSet::new();
        let neighbors = neighbors
            .into_iter()
            .filter(|&n| n != id && seen.insert(n))
            .collect();
        Self {
            id,
            color,
            initial_color: color,
            neighbors,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn initial_color(&self) -> Color {
        self.initial_color
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether the node currently holds a color other than its initial one.
    pub fn has_migrated(&self) -> bool {
        self.color != self.initial_color
    }
}

/// The whole node population, keyed and iterated by ascending id.
///
/// Every neighbor id referenced by a node is guaranteed to be a node of
/// the graph, and adjacency is symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    ids: Vec<NodeId>,
}

impl Graph {
    /// Builds a graph from explicit nodes, checking that ids are unique and
    /// that every adjacency is present in both directions.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for node in nodes {
            let id = node.id;
            if map.insert(id, node).is_some() {
                return Err(JabejaError::DuplicateNode(id));
            }
        }

        for node in map.values() {
            for &neighbor in &node.neighbors {
                let other = map.get(&neighbor).ok_or(JabejaError::UnknownNeighbor {
                    node: node.id,
                    neighbor,
                })?;
                if !other.neighbors.contains(&node.id) {
                    return Err(JabejaError::AsymmetricEdge {
                        node: node.id,
                        neighbor,
                    });
                }
            }
        }

        let ids = map.keys().copied().collect();
        Ok(Self { nodes: map, ids })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All node ids in ascending order. Index-addressable for uniform sampling.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.nodes.get(&id).map(|n| n.color)
    }

    /// Iterates nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Number of `node`'s neighbors currently holding `color`.
    ///
    /// Always recomputed from current colors; nothing is cached.
    pub fn degree(&self, node: &Node, color: Color) -> usize {
        node.neighbors
            .iter()
            .filter(|&&n| self.color(n) == Some(color))
            .count()
    }

    /// How many nodes hold each color.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes.values() {
            *counts.entry(node.color).or_insert(0) += 1;
        }
        counts
    }

    /// Exchanges the colors of `p` and `q` in place.
    ///
    /// Returns `false` (and changes nothing) if either id is unknown.
    pub(crate) fn swap_colors(&mut self, p: NodeId, q: NodeId) -> bool {
        let (Some(color_p), Some(color_q)) = (self.color(p), self.color(q)) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(&p) {
            node.color = color_q;
        }
        if let Some(node) = self.nodes.get_mut(&q) {
            node.color = color_p;
        }
        true
    }
}

/// Accumulates symmetric adjacency before colors are assigned.
///
/// # Examples
///
/// ```
/// use u_jabeja::graph::{GraphBuilder, InitialColorPolicy};
///
/// let mut builder = GraphBuilder::new();
/// builder.add_edge(1, 2).add_edge(2, 3).add_node(4);
/// let graph = builder.build(InitialColorPolicy::RoundRobin, 2, 0).unwrap();
/// assert_eq!(graph.len(), 4);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node, possibly isolated.
    pub fn add_node(&mut self, id: NodeId) -> &mut Self {
        self.adjacency.entry(id).or_default();
        self
    }

    /// Registers an undirected edge. Self-loops only register the node.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        let from = self.adjacency.entry(a).or_default();
        if a != b {
            from.insert(b);
        }
        let to = self.adjacency.entry(b).or_default();
        if a != b {
            to.insert(a);
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Colors the nodes with `policy` over `partitions` colors and builds the graph.
    pub fn build(self, policy: InitialColorPolicy, partitions: u32, seed: u64) -> Result<Graph> {
        let ids: Vec<NodeId> = self.adjacency.keys().copied().collect();
        let colors = policy.assign(&ids, partitions, seed)?;
        let lookup: BTreeMap<NodeId, Color> = ids.into_iter().zip(colors).collect();
        self.build_with(|id| lookup.get(&id).copied().unwrap_or(0))
    }

    /// Builds the graph with colors chosen by `color_of`.
    pub fn build_with(self, mut color_of: impl FnMut(NodeId) -> Color) -> Result<Graph> {
        let nodes = self
            .adjacency
            .into_iter()
            .map(|(id, neighbors)| Node::new(id, color_of(id), neighbors))
            .collect::<Vec<_>>();
        Graph::from_nodes(nodes)
    }
}
