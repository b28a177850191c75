//! Ja-be-Ja graph partitioning simulator.
//!
//! A single-process simulation of the decentralized Ja-be-Ja algorithm:
//!
//! - **Graph** ([`graph`]): node store with symmetric adjacency, METIS
//!   loading and initial color assignment.
//! - **Ja-be-Ja** ([`jabeja`]): partner sampling, swap benefit evaluation,
//!   annealing schedule with restarts, and the round driver.
//! - **Report** ([`report`]): per-round edge cut, swaps and migrations,
//!   written as a tab-separated report file.
//!
//! # Example
//!
//! ```
//! use u_jabeja::graph::{read_metis, InitialColorPolicy};
//! use u_jabeja::jabeja::{JabejaConfig, JabejaRunner, NodeSelectionPolicy};
//! use u_jabeja::report::MemoryReport;
//!
//! let metis = "4 4\n2 4\n1 3\n2 4\n1 3\n";
//! let graph = read_metis(metis.as_bytes())
//!     .unwrap()
//!     .build(InitialColorPolicy::RoundRobin, 2, 0)
//!     .unwrap();
//!
//! let config = JabejaConfig::default()
//!     .with_rounds(5)
//!     .with_node_selection(NodeSelectionPolicy::Hybrid);
//! let mut runner = JabejaRunner::new(graph, config).unwrap();
//! let result = runner.run(&mut MemoryReport::new()).unwrap();
//! assert_eq!(result.history.len(), 5);
//! ```

pub mod error;
pub mod graph;
pub mod jabeja;
pub mod report;
pub mod rng;

pub use error::{JabejaError, Result};
