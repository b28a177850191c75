//! METIS adjacency-file reader.
//!
//! Format: `%` lines are comments; the first remaining line is
//! `<vertices> <edges> [fmt]`; each of the next `<vertices>` lines lists the
//! 1-based neighbors of the corresponding vertex. An empty line is an
//! isolated vertex. Only unweighted graphs (`fmt` absent or `0`) are read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;

use super::types::{GraphBuilder, NodeId};
use crate::error::{JabejaError, Result};

/// Reads a METIS graph from a file.
pub fn load_metis(path: impl AsRef<Path>) -> Result<GraphBuilder> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| JabejaError::io(path, e))?;
    read_metis(BufReader::new(file)).map_err(|e| match e {
        JabejaError::Io { source, .. } => JabejaError::io(path, source),
        other => other,
    })
}

/// Reads a METIS graph from any buffered reader.
///
/// Vertex `i` of the file becomes node id `i` (1-based).
pub fn read_metis<R: BufRead>(reader: R) -> Result<GraphBuilder> {
    let mut header: Option<(usize, usize)> = None;
    let mut builder = GraphBuilder::new();
    let mut vertex: usize = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| JabejaError::io("<metis input>", e))?;
        let trimmed = line.trim();
        if trimmed.starts_with('%') {
            continue;
        }

        let Some((vertices, _)) = header else {
            if trimmed.is_empty() {
                continue;
            }
            let parsed = parse_header(trimmed, line_no)?;
            for id in 1..=parsed.0 {
                builder.add_node(to_node_id(id, line_no)?);
            }
            header = Some(parsed);
            continue;
        };

        if vertex == vertices {
            if !trimmed.is_empty() {
                return Err(JabejaError::parse(
                    line_no,
                    format!("unexpected data after {vertices} adjacency lines"),
                ));
            }
            continue;
        }

        vertex += 1;
        let from = to_node_id(vertex, line_no)?;
        for token in trimmed.split_whitespace() {
            let to: usize = token
                .parse()
                .map_err(|_| JabejaError::parse(line_no, format!("invalid vertex id '{token}'")))?;
            if to == 0 || to > vertices {
                return Err(JabejaError::parse(
                    line_no,
                    format!("vertex id {to} outside 1..={vertices}"),
                ));
            }
            builder.add_edge(from, to_node_id(to, line_no)?);
        }
    }

    let Some((vertices, edges)) = header else {
        return Err(JabejaError::parse(0, "missing header line"));
    };
    if vertex < vertices {
        return Err(JabejaError::parse(
            0,
            format!("expected {vertices} adjacency lines, found {vertex}"),
        ));
    }
    if builder.edge_count() != edges {
        warn!(
            "header declares {edges} edges but adjacency contains {}",
            builder.edge_count()
        );
    }

    Ok(builder)
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(JabejaError::parse(
            line_no,
            "header must be '<vertices> <edges> [fmt]'",
        ));
    }
    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| JabejaError::parse(line_no, format!("invalid header field '{s}'")))
    };
    let vertices = number(fields[0])?;
    let edges = number(fields[1])?;
    if let Some(fmt) = fields.get(2) {
        if fmt.chars().any(|c| c != '0') {
            return Err(JabejaError::parse(
                line_no,
                format!("weighted graph format '{fmt}' is not supported"),
            ));
        }
    }
    Ok((vertices, edges))
}

fn to_node_id(id: usize, line_no: usize) -> Result<NodeId> {
    NodeId::try_from(id).map_err(|_| JabejaError::parse(line_no, format!("vertex id {id} too large")))
}
