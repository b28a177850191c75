//! Initial color assignment.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::types::{Color, NodeId};
use crate::error::{JabejaError, Result};
use crate::rng::create_rng;

/// How colors are handed out before the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialColorPolicy {
    /// The i-th node (ascending id) gets color `i mod k`.
    #[default]
    RoundRobin,
    /// Contiguous id blocks of `ceil(n / k)` nodes share a color.
    Batch,
    /// Uniform random color per node from a seeded generator.
    Random,
}

impl InitialColorPolicy {
    /// Assigns one color in `[0, partitions)` to each id, in order.
    pub fn assign(self, ids: &[NodeId], partitions: u32, seed: u64) -> Result<Vec<Color>> {
        if partitions == 0 {
            return Err(JabejaError::InvalidConfig(
                "number of partitions must be positive".into(),
            ));
        }

        let colors = match self {
            InitialColorPolicy::RoundRobin => (0..ids.len())
                .map(|i| (i % partitions as usize) as Color)
                .collect(),
            InitialColorPolicy::Batch => {
                let block = ids.len().div_ceil(partitions as usize).max(1);
                (0..ids.len()).map(|i| (i / block) as Color).collect()
            }
            InitialColorPolicy::Random => {
                let mut rng = create_rng(seed);
                ids.iter().map(|_| rng.random_range(0..partitions)).collect()
            }
        };
        Ok(colors)
    }
}

impl fmt::Display for InitialColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitialColorPolicy::RoundRobin => "ROUND_ROBIN",
            InitialColorPolicy::Batch => "BATCH",
            InitialColorPolicy::Random => "RANDOM",
        };
        f.write_str(name)
    }
}

impl FromStr for InitialColorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ROUND_ROBIN" => Ok(InitialColorPolicy::RoundRobin),
            "BATCH" => Ok(InitialColorPolicy::Batch),
            "RANDOM" => Ok(InitialColorPolicy::Random),
            other => Err(format!(
                "unknown initial color policy '{other}' (expected ROUND_ROBIN, BATCH or RANDOM)"
            )),
        }
    }
}
