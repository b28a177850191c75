//! Temperature schedule with periodic restarts.

use log::debug;

use super::config::{AnnealingPolicy, JabejaConfig};

/// Owns the current temperature and applies one cooldown per round.
#[derive(Debug, Clone)]
pub struct Annealer {
    temperature: f64,
    initial: f64,
    delta: f64,
    policy: AnnealingPolicy,
    restart: usize,
}

impl Annealer {
    pub fn new(config: &JabejaConfig) -> Self {
        Self {
            temperature: config.temperature,
            initial: config.temperature,
            delta: config.delta,
            policy: config.annealing,
            restart: config.restart,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Applies the cooldown that follows round `round` (0-based).
    ///
    /// Above the policy floor, `Linear` subtracts `delta` and `Exponential`
    /// multiplies by it; the result never drops below the floor. Schedules
    /// that clamp only once `T` is already at or below the floor let a linear
    /// run from 1.1 with delta 0.3 spend one round at 0.8; this one goes
    /// straight to 1.0.
    ///
    /// Afterwards, when a restart period `k > 0` is set and `round % k == 0`,
    /// the temperature returns to its initial value.
    pub fn cool_down(&mut self, round: usize) -> f64 {
        let floor = self.policy.min_temperature();

        self.temperature = if self.temperature > floor {
            let next = match self.policy {
                AnnealingPolicy::Linear => self.temperature - self.delta,
                AnnealingPolicy::Exponential => self.temperature * self.delta,
            };
            next.max(floor)
        } else {
            floor
        };

        if self.restart > 0 && round % self.restart == 0 {
            debug!("round {round}: temperature restarted to {}", self.initial);
            self.temperature = self.initial;
        }

        self.temperature
    }
}
