//! Round driver.
//!
//! # Algorithm
//!
//! For each round:
//! 1. Visit every node once, in ascending id order
//!    a. `Local`/`Hybrid`: look for a partner among sampled neighbors
//!    b. `Random`, or `Hybrid` with no local partner: look among a uniform
//!       sample of the whole graph
//!    c. Swap colors with the partner, if any, and count the swap
//! 2. Cool down the temperature (with optional periodic restart)
//! 3. Measure the graph and report the round
//!
//! Swaps take effect immediately: later nodes in the same sweep see the
//! colors left by earlier swaps.

use log::{debug, info};
use rand::rngs::StdRng;

use super::annealing::Annealer;
use super::benefit::{find_partner, Partner};
use super::config::JabejaConfig;
use super::sampler::{global_sample, neighbor_sample};
use crate::error::{JabejaError, Result};
use crate::graph::{Graph, NodeId};
use crate::report::{ReportSink, RoundMetrics};
use crate::rng::create_rng;

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Index of the next round to execute.
    pub round: usize,
    /// Swaps performed since the run started. Never reset.
    pub swaps: usize,
    /// Temperature the next round will use.
    pub temperature: f64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct JabejaResult {
    /// Rounds executed by this call.
    pub rounds: usize,

    /// Total swaps since the run started.
    pub swaps: usize,

    /// Edge cut after the last round.
    pub edge_cut: usize,

    /// Migrations after the last round.
    pub migrations: usize,

    /// Temperature after the last cooldown.
    pub final_temperature: f64,

    /// Metrics of every round executed by this call.
    pub history: Vec<RoundMetrics>,
}

/// Executes Ja-be-Ja over a graph it owns.
///
/// # Examples
///
/// ```
/// use u_jabeja::graph::{GraphBuilder, InitialColorPolicy};
/// use u_jabeja::jabeja::{JabejaConfig, JabejaRunner};
/// use u_jabeja::report::MemoryReport;
///
/// let mut builder = GraphBuilder::new();
/// for i in 0..20 {
///     builder.add_edge(i, (i + 1) % 20);
/// }
/// let graph = builder.build(InitialColorPolicy::RoundRobin, 2, 0).unwrap();
///
/// let config = JabejaConfig::default().with_rounds(10).with_seed(1);
/// let mut runner = JabejaRunner::new(graph, config).unwrap();
/// let mut report = MemoryReport::new();
/// let result = runner.run(&mut report).unwrap();
///
/// assert_eq!(result.rounds, 10);
/// assert_eq!(report.rounds.len(), 10);
/// ```
#[derive(Debug)]
pub struct JabejaRunner {
    graph: Graph,
    config: JabejaConfig,
    annealer: Annealer,
    rng: StdRng,
    state: SimulationState,
}

impl JabejaRunner {
    /// Prepares a run. Fails if the configuration does not validate.
    pub fn new(graph: Graph, config: JabejaConfig) -> Result<Self> {
        config.validate().map_err(JabejaError::InvalidConfig)?;
        debug!(
            "jabeja: {} nodes, {} edges, {:?}",
            graph.len(),
            graph.edge_count(),
            config
        );

        let annealer = Annealer::new(&config);
        let state = SimulationState {
            round: 0,
            swaps: 0,
            temperature: annealer.temperature(),
        };
        Ok(Self {
            rng: create_rng(config.seed),
            graph,
            config,
            annealer,
            state,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &JabejaConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Consumes the runner, returning the recolored graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Whether every configured round has been executed.
    pub fn is_finished(&self) -> bool {
        self.state.round >= self.config.rounds
    }

    /// Executes one round: sweep, cooldown, measurement.
    pub fn step(&mut self) -> RoundMetrics {
        let round = self.state.round;

        for index in 0..self.graph.len() {
            let id = self.graph.ids()[index];
            self.sample_and_swap(id);
        }

        self.state.temperature = self.annealer.cool_down(round);

        let metrics = RoundMetrics::compute(&self.graph, round, self.state.swaps);
        info!(
            "round: {}, edge cut: {}, swaps: {}, migrations: {}",
            metrics.round, metrics.edge_cut, metrics.swaps, metrics.migrations
        );

        self.state.round += 1;
        metrics
    }

    /// Executes the remaining rounds, handing each round to `sink`.
    ///
    /// A sink error aborts the run after the round it failed on.
    pub fn run<S: ReportSink>(&mut self, sink: &mut S) -> Result<JabejaResult> {
        let mut history = Vec::with_capacity(self.config.rounds.saturating_sub(self.state.round));

        while !self.is_finished() {
            let metrics = self.step();
            sink.record(&metrics)?;
            history.push(metrics);
        }

        let (edge_cut, migrations) = match history.last() {
            Some(last) => (last.edge_cut, last.migrations),
            None => {
                let now = RoundMetrics::compute(&self.graph, self.state.round, self.state.swaps);
                (now.edge_cut, now.migrations)
            }
        };

        Ok(JabejaResult {
            rounds: history.len(),
            swaps: self.state.swaps,
            edge_cut,
            migrations,
            final_temperature: self.state.temperature,
            history,
        })
    }

    /// Looks for a partner for `id` and swaps with it. Returns whether a swap happened.
    fn sample_and_swap(&mut self, id: NodeId) -> bool {
        let policy = self.config.node_selection;
        let mut partner = None;

        if policy.samples_neighbors() {
            let Some(node) = self.graph.node(id) else {
                return false;
            };
            let candidates = neighbor_sample(node, self.config.neighbor_sample_size, &mut self.rng);
            partner = self.best_partner(id, &candidates);
        }

        if partner.is_none() && policy.samples_globally() {
            let candidates = global_sample(
                &self.graph,
                id,
                self.config.random_sample_size,
                &mut self.rng,
            );
            partner = self.best_partner(id, &candidates);
        }

        let Some(partner) = partner else {
            return false;
        };
        if !self.graph.swap_colors(id, partner.id) {
            return false;
        }
        self.state.swaps += 1;
        true
    }

    fn best_partner(&mut self, id: NodeId, candidates: &[NodeId]) -> Option<Partner> {
        find_partner(
            &self.graph,
            id,
            candidates,
            self.config.alpha,
            self.state.temperature,
            self.config.annealing,
            &mut self.rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, InitialColorPolicy, Node};
    use crate::jabeja::{AnnealingPolicy, NodeSelectionPolicy};
    use crate::report::{edge_cut, MemoryReport};
    use proptest::prelude::*;
    use rand::Rng;

    fn ring(n: u32, partitions: u32) -> Graph {
        let mut builder = GraphBuilder::new();
        for i in 0..n {
            builder.add_edge(i, (i + 1) % n);
            builder.add_edge(i, (i + 7) % n);
        }
        builder
            .build(InitialColorPolicy::Random, partitions, 99)
            .unwrap()
    }

    fn config(selection: NodeSelectionPolicy) -> JabejaConfig {
        JabejaConfig::default()
            .with_rounds(1)
            .with_temperature(1.0)
            .with_node_selection(selection)
            .with_annealing(AnnealingPolicy::Linear)
            .with_seed(42)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = ring(10, 2);
        let err = JabejaRunner::new(graph, JabejaConfig::default().with_temperature(-1.0))
            .unwrap_err();
        assert!(matches!(err, JabejaError::InvalidConfig(_)));
    }

    #[test]
    fn test_isolated_single_node_round_is_noop() {
        let graph = Graph::from_nodes(vec![Node::new(1, 0, vec![])]).unwrap();
        let mut runner = JabejaRunner::new(graph, config(NodeSelectionPolicy::Random)).unwrap();

        let metrics = runner.step();
        assert_eq!(metrics.round, 0);
        assert_eq!(metrics.swaps, 0);
        assert_eq!(metrics.edge_cut, 0);
        assert_eq!(metrics.migrations, 0);
    }

    #[test]
    fn test_adjacent_pair_swaps_within_one_sweep() {
        // 1 (color 1) -- 2 (color 2). Node 1 swaps with 2, then node 2,
        // seeing the new colors, swaps back. The edge stays cut.
        let graph =
            Graph::from_nodes(vec![Node::new(1, 1, vec![2]), Node::new(2, 2, vec![1])]).unwrap();
        let cfg = config(NodeSelectionPolicy::Local).with_temperature(10.0);
        let mut runner = JabejaRunner::new(graph, cfg).unwrap();

        let metrics = runner.step();
        assert_eq!(metrics.swaps, 2);
        assert_eq!(metrics.edge_cut, 1);
        assert_eq!(metrics.migrations, 0);
        assert_eq!(runner.graph().color(1), Some(1));
    }

    #[test]
    fn test_random_policy_single_swap_clears_cut() {
        // 1(0)-2(1) and 3(1)-{4(0), 5(0)}: swapping 1 and 3 removes both cuts.
        let graph = Graph::from_nodes(vec![
            Node::new(1, 0, vec![2]),
            Node::new(2, 1, vec![1]),
            Node::new(3, 1, vec![4, 5]),
            Node::new(4, 0, vec![3]),
            Node::new(5, 0, vec![3]),
        ])
        .unwrap();
        assert_eq!(edge_cut(&graph), 3);

        let cfg = config(NodeSelectionPolicy::Random).with_random_sample_size(10);
        let mut runner = JabejaRunner::new(graph, cfg).unwrap();
        let metrics = runner.step();

        assert_eq!(metrics.swaps, 1);
        assert_eq!(metrics.edge_cut, 0);
        assert_eq!(metrics.migrations, 2);
        assert_eq!(runner.graph().color(1), Some(1));
        assert_eq!(runner.graph().color(3), Some(0));
    }

    #[test]
    fn test_hybrid_falls_back_to_global_sample() {
        // node 1 is isolated, so only the global phase can find it a partner
        let nodes = || {
            vec![
                Node::new(1, 0, vec![]),
                Node::new(2, 1, vec![3]),
                Node::new(3, 0, vec![2]),
            ]
        };

        let hybrid = Graph::from_nodes(nodes()).unwrap();
        let mut runner = JabejaRunner::new(hybrid, config(NodeSelectionPolicy::Hybrid)).unwrap();
        let metrics = runner.step();
        assert_eq!(metrics.swaps, 1);
        assert_eq!(metrics.edge_cut, 0);

        let local = Graph::from_nodes(nodes()).unwrap();
        let mut runner = JabejaRunner::new(local, config(NodeSelectionPolicy::Local)).unwrap();
        let metrics = runner.step();
        assert_eq!(metrics.edge_cut, 1);
    }

    #[test]
    fn test_hybrid_skips_global_sample_when_neighbor_found() {
        // 1(0)-2(1) swap locally; 3 and 4 are only reachable by a global sample
        let nodes = || {
            vec![
                Node::new(1, 0, vec![2]),
                Node::new(2, 1, vec![1]),
                Node::new(3, 1, vec![]),
                Node::new(4, 0, vec![]),
            ]
        };

        let mut hybrid = JabejaRunner::new(
            Graph::from_nodes(nodes()).unwrap(),
            config(NodeSelectionPolicy::Hybrid),
        )
        .unwrap();
        let mut local = JabejaRunner::new(
            Graph::from_nodes(nodes()).unwrap(),
            config(NodeSelectionPolicy::Local),
        )
        .unwrap();

        assert!(hybrid.sample_and_swap(1));
        assert!(local.sample_and_swap(1));

        assert_eq!(hybrid.graph().color(1), Some(1));
        assert_eq!(hybrid.graph().color(2), Some(0));
        assert_eq!(hybrid.graph().color(3), Some(1));
        assert_eq!(hybrid.graph().color(4), Some(0));
        assert_eq!(hybrid.state().swaps, 1);
        assert_eq!(hybrid.graph(), local.graph());
        assert_eq!(hybrid.rng.random::<u64>(), local.rng.random::<u64>());
    }

    #[test]
    fn test_run_reports_every_round() {
        let cfg = JabejaConfig::default().with_rounds(25).with_seed(3);
        let mut runner = JabejaRunner::new(ring(60, 4), cfg).unwrap();
        let mut report = MemoryReport::new();

        let result = runner.run(&mut report).unwrap();

        assert_eq!(result.rounds, 25);
        assert_eq!(report.rounds, result.history);
        assert!(runner.is_finished());
        for (i, metrics) in report.rounds.iter().enumerate() {
            assert_eq!(metrics.round, i);
        }
        for window in report.rounds.windows(2) {
            assert!(window[1].swaps >= window[0].swaps);
        }
        assert_eq!(result.swaps, runner.state().swaps);
        assert_eq!(result.edge_cut, edge_cut(runner.graph()));
    }

    #[test]
    fn test_zero_rounds() {
        let graph = ring(10, 2);
        let cut = edge_cut(&graph);
        let mut runner = JabejaRunner::new(graph, JabejaConfig::default().with_rounds(0)).unwrap();
        let result = runner.run(&mut MemoryReport::new()).unwrap();
        assert_eq!(result.rounds, 0);
        assert_eq!(result.edge_cut, cut);
        assert!((result.final_temperature - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_run_reduces_edge_cut() {
        let graph = ring(200, 4);
        let initial = edge_cut(&graph);
        let cfg = JabejaConfig::default()
            .with_rounds(300)
            .with_delta(0.01)
            .with_seed(5);
        let mut runner = JabejaRunner::new(graph, cfg).unwrap();
        let result = runner.run(&mut MemoryReport::new()).unwrap();
        assert!(
            result.edge_cut < initial,
            "expected edge cut below {initial}, got {}",
            result.edge_cut
        );
    }

    #[test]
    fn test_same_seed_same_history() {
        let cfg = JabejaConfig::default()
            .with_rounds(20)
            .with_annealing(AnnealingPolicy::Exponential)
            .with_delta(0.9)
            .with_seed(17);

        let mut a = JabejaRunner::new(ring(80, 3), cfg.clone()).unwrap();
        let mut b = JabejaRunner::new(ring(80, 3), cfg).unwrap();
        let ra = a.run(&mut MemoryReport::new()).unwrap();
        let rb = b.run(&mut MemoryReport::new()).unwrap();

        assert_eq!(ra.history, rb.history);
        assert_eq!(a.into_graph(), b.into_graph());
    }

    #[test]
    fn test_restart_visible_in_state() {
        let cfg = JabejaConfig::default()
            .with_rounds(5)
            .with_temperature(3.0)
            .with_delta(0.5)
            .with_restart(2);
        let mut runner = JabejaRunner::new(ring(20, 2), cfg).unwrap();

        runner.step(); // round 0: restart
        assert!((runner.state().temperature - 3.0).abs() < 1e-12);
        runner.step(); // round 1: cooled
        assert!((runner.state().temperature - 2.5).abs() < 1e-12);
        runner.step(); // round 2: restart
        assert!((runner.state().temperature - 3.0).abs() < 1e-12);
    }

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn record(&mut self, _metrics: &RoundMetrics) -> Result<()> {
            Err(JabejaError::io(
                "report",
                std::io::Error::other("disk full"),
            ))
        }
    }

    #[test]
    fn test_sink_error_aborts_run() {
        let mut runner =
            JabejaRunner::new(ring(10, 2), JabejaConfig::default().with_rounds(10)).unwrap();
        assert!(runner.run(&mut FailingSink).is_err());
        assert_eq!(runner.state().round, 1);
    }

    proptest! {
        #[test]
        fn prop_swaps_conserve_colors(
            n in 2u32..40,
            k in 1u32..5,
            selection in prop_oneof![
                Just(NodeSelectionPolicy::Local),
                Just(NodeSelectionPolicy::Random),
                Just(NodeSelectionPolicy::Hybrid),
            ],
            exponential in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let graph = ring(n, k);
            let before = graph.color_counts();
            let annealing = if exponential {
                AnnealingPolicy::Exponential
            } else {
                AnnealingPolicy::Linear
            };
            let cfg = JabejaConfig::default()
                .with_rounds(5)
                .with_node_selection(selection)
                .with_annealing(annealing)
                .with_delta(0.9)
                .with_seed(seed);
            let mut runner = JabejaRunner::new(graph, cfg).unwrap();

            for _ in 0..5 {
                let metrics = runner.step();
                prop_assert_eq!(&runner.graph().color_counts(), &before);
                prop_assert_eq!(metrics.edge_cut, edge_cut(runner.graph()));
            }
        }
    }
}
