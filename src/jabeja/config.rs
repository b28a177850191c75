//! Ja-be-Ja configuration and policies.

use std::fmt;
use std::str::FromStr;

/// Temperature schedule and the acceptance rule that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnealingPolicy {
    /// `T -= delta` each round, floor 1.0. A swap is accepted when
    /// `swapped * T > old`.
    #[default]
    Linear,
    /// `T *= delta` each round, floor 1e-4. A swap is accepted with
    /// probability `exp((swapped - old) / T)`.
    Exponential,
}

impl AnnealingPolicy {
    /// Lowest temperature the cooldown settles at.
    pub fn min_temperature(self) -> f64 {
        match self {
            AnnealingPolicy::Linear => 1.0,
            AnnealingPolicy::Exponential => 1e-4,
        }
    }
}

impl fmt::Display for AnnealingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnnealingPolicy::Linear => "LINEAR",
            AnnealingPolicy::Exponential => "EXPONENTIAL",
        })
    }
}

impl FromStr for AnnealingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LINEAR" => Ok(AnnealingPolicy::Linear),
            "EXPONENTIAL" => Ok(AnnealingPolicy::Exponential),
            other => Err(format!(
                "unknown annealing policy '{other}' (expected LINEAR or EXPONENTIAL)"
            )),
        }
    }
}

/// Where swap partners are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSelectionPolicy {
    /// Only the node's own neighbors.
    Local,
    /// Only a uniform sample of the whole graph.
    Random,
    /// Neighbors first, the whole graph if no neighbor is acceptable.
    #[default]
    Hybrid,
}

impl NodeSelectionPolicy {
    pub(crate) fn samples_neighbors(self) -> bool {
        matches!(self, NodeSelectionPolicy::Local | NodeSelectionPolicy::Hybrid)
    }

    pub(crate) fn samples_globally(self) -> bool {
        matches!(self, NodeSelectionPolicy::Random | NodeSelectionPolicy::Hybrid)
    }
}

impl fmt::Display for NodeSelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeSelectionPolicy::Local => "LOCAL",
            NodeSelectionPolicy::Random => "RANDOM",
            NodeSelectionPolicy::Hybrid => "HYBRID",
        })
    }
}

impl FromStr for NodeSelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(NodeSelectionPolicy::Local),
            "RANDOM" => Ok(NodeSelectionPolicy::Random),
            "HYBRID" => Ok(NodeSelectionPolicy::Hybrid),
            other => Err(format!(
                "unknown node selection policy '{other}' (expected LOCAL, RANDOM or HYBRID)"
            )),
        }
    }
}

/// Configuration for a Ja-be-Ja run.
///
/// # Examples
///
/// ```
/// use u_jabeja::jabeja::{AnnealingPolicy, JabejaConfig, NodeSelectionPolicy};
///
/// let config = JabejaConfig::default()
///     .with_rounds(500)
///     .with_temperature(2.0)
///     .with_delta(0.003)
///     .with_annealing(AnnealingPolicy::Linear)
///     .with_node_selection(NodeSelectionPolicy::Hybrid)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JabejaConfig {
    /// Number of full sweeps over the graph.
    pub rounds: usize,

    /// Starting temperature, also the value restored on restart.
    pub temperature: f64,

    /// Cooldown step: subtracted under `Linear`, multiplied under `Exponential`.
    pub delta: f64,

    /// Annealing schedule and acceptance rule.
    pub annealing: AnnealingPolicy,

    /// Partner sampling policy.
    pub node_selection: NodeSelectionPolicy,

    /// How many neighbors to sample as swap candidates.
    pub neighbor_sample_size: usize,

    /// How many nodes to sample from the whole graph as swap candidates.
    pub random_sample_size: usize,

    /// Exponent applied to same-color degrees when scoring a swap.
    pub alpha: f64,

    /// Reset the temperature every this many rounds. 0 = never.
    pub restart: usize,

    /// Seed for every random draw of the run.
    pub seed: u64,
}

impl Default for JabejaConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            temperature: 2.0,
            delta: 0.003,
            annealing: AnnealingPolicy::default(),
            node_selection: NodeSelectionPolicy::default(),
            neighbor_sample_size: 3,
            random_sample_size: 6,
            alpha: 2.0,
            restart: 0,
            seed: 0,
        }
    }
}

impl JabejaConfig {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = t;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_annealing(mut self, policy: AnnealingPolicy) -> Self {
        self.annealing = policy;
        self
    }

    pub fn with_node_selection(mut self, policy: NodeSelectionPolicy) -> Self {
        self.node_selection = policy;
        self
    }

    pub fn with_neighbor_sample_size(mut self, n: usize) -> Self {
        self.neighbor_sample_size = n;
        self
    }

    pub fn with_random_sample_size(mut self, n: usize) -> Self {
        self.random_sample_size = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the restart period in rounds (0 disables restarts).
    pub fn with_restart(mut self, period: usize) -> Self {
        self.restart = period;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            ));
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(format!(
                "delta must be positive and finite, got {}",
                self.delta
            ));
        }
        if self.annealing == AnnealingPolicy::Exponential && self.delta > 1.0 {
            return Err(format!(
                "exponential delta must be in (0, 1], got {}",
                self.delta
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!(
                "alpha must be non-negative and finite, got {}",
                self.alpha
            ));
        }
        Ok(())
    }
}
