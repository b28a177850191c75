//! Ja-be-Ja graph partitioning.
//!
//! Every node holds a color and repeatedly tries to swap it with a sampled
//! partner so that more of its neighbors share its color. Simulated
//! annealing lets early rounds accept swaps that do not strictly improve
//! the local structure, and restarts can periodically reheat the search.
//!
//! # References
//!
//! - Rahimian, Payberah, Girdzijauskas, Jelasity & Haridi (2013),
//!   "JA-BE-JA: A Distributed Algorithm for Balanced Graph Partitioning"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod annealing;
mod benefit;
mod config;
mod runner;
mod sampler;

pub use annealing::Annealer;
pub use benefit::{find_partner, Partner, SwapScore};
pub use config::{AnnealingPolicy, JabejaConfig, NodeSelectionPolicy};
pub use runner::{JabejaResult, JabejaRunner, SimulationState};
pub use sampler::{global_sample, neighbor_sample};
