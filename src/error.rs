//! Error types for the Ja-be-Ja simulator.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Errors produced while loading a graph, configuring a run or writing its report.
#[derive(Debug, Error)]
pub enum JabejaError {
    /// Filesystem failure (reading a graph, creating the output directory,
    /// writing the report).
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed graph input.
    #[error("graph parse error at line {line}: {message}")]
    GraphParse { line: usize, message: String },

    /// A node lists a neighbor that is not part of the graph.
    #[error("node {node} references unknown neighbor {neighbor}")]
    UnknownNeighbor { node: NodeId, neighbor: NodeId },

    /// `node` lists `neighbor` but `neighbor` does not list `node` back.
    #[error("edge {node} -> {neighbor} has no reverse edge")]
    AsymmetricEdge { node: NodeId, neighbor: NodeId },

    /// The same node id was supplied twice.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl JabejaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JabejaError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        JabejaError::GraphParse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JabejaError>;
