//! Swap benefit evaluation.
//!
//! For a pair `(p, q)`, with `d(x, c)` the number of `x`'s neighbors colored `c`:
//!
//! ```text
//! old     = d(p, color(p))^alpha + d(q, color(q))^alpha
//! swapped = d(p, color(q))^alpha + d(q, color(p))^alpha
//! ```
//!
//! The annealing policy decides how the two are compared.

use rand::Rng;

use super::config::AnnealingPolicy;
use crate::graph::{Graph, Node, NodeId};

/// Same-color cohesion of a pair now and after a hypothetical color swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapScore {
    pub old: f64,
    pub swapped: f64,
}

impl SwapScore {
    /// Scores swapping the colors of `p` and `q` against current graph colors.
    pub fn compute(graph: &Graph, p: &Node, q: &Node, alpha: f64) -> Self {
        let pow = |degree: usize| (degree as f64).powf(alpha);
        let old = pow(graph.degree(p, p.color())) + pow(graph.degree(q, q.color()));
        let swapped = pow(graph.degree(p, q.color())) + pow(graph.degree(q, p.color()));
        Self { old, swapped }
    }

    /// Boltzmann acceptance probability `exp((swapped - old) / T)`.
    pub fn acceptance_probability(&self, temperature: f64) -> f64 {
        ((self.swapped - self.old) / temperature).exp()
    }
}

/// The partner chosen for a node, with the value it won on: the swapped
/// cohesion under `Linear`, the acceptance probability under `Exponential`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partner {
    pub id: NodeId,
    pub benefit: f64,
}

/// Picks the best swap partner for `node` among `candidates`, if any is acceptable.
///
/// - `Linear`: a candidate qualifies when `swapped * T > old`; the one with
///   the largest `swapped` wins, earlier candidates winning ties.
/// - `Exponential`: a candidate qualifies when its acceptance probability
///   beats the best so far, beats a fresh uniform draw, and `swapped != old`.
///   A uniform value is drawn only for candidates that pass the first test.
pub fn find_partner<R: Rng>(
    graph: &Graph,
    node: NodeId,
    candidates: &[NodeId],
    alpha: f64,
    temperature: f64,
    policy: AnnealingPolicy,
    rng: &mut R,
) -> Option<Partner> {
    let p = graph.node(node)?;
    let mut best: Option<Partner> = None;
    let mut highest = 0.0;

    for q in candidates.iter().filter_map(|&id| graph.node(id)) {
        let score = SwapScore::compute(graph, p, q, alpha);

        let benefit = match policy {
            AnnealingPolicy::Linear => {
                if score.swapped * temperature > score.old && score.swapped > highest {
                    Some(score.swapped)
                } else {
                    None
                }
            }
            AnnealingPolicy::Exponential => {
                let probability = score.acceptance_probability(temperature);
                if probability > highest
                    && probability > rng.random::<f64>()
                    && score.swapped != score.old
                {
                    Some(probability)
                } else {
                    None
                }
            }
        };

        if let Some(benefit) = benefit {
            highest = benefit;
            best = Some(Partner { id: q.id(), benefit });
        }
    }

    best
}
