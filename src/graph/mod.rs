//! Graph store and graph construction.
//!
//! [`Graph`] owns every [`Node`] for the lifetime of a simulation. Graphs
//! are assembled with a [`GraphBuilder`], either by hand or from a METIS
//! adjacency file via [`load_metis`], and colored with an
//! [`InitialColorPolicy`].

mod coloring;
mod metis;
mod types;

pub use coloring::InitialColorPolicy;
pub use metis::{load_metis, read_metis};
pub use types::{Color, Graph, GraphBuilder, Node, NodeId};
