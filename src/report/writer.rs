//! Report sinks and the run report file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::metrics::RoundMetrics;
use crate::error::{JabejaError, Result};
use crate::graph::InitialColorPolicy;
use crate::jabeja::{AnnealingPolicy, JabejaConfig};

const DELIMITER: &str = "\t\t";

/// Receives the metrics of every completed round.
pub trait ReportSink {
    /// Persists one round. An error aborts the run.
    fn record(&mut self, metrics: &RoundMetrics) -> Result<()>;
}

/// Keeps every round in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReport {
    pub rounds: Vec<RoundMetrics>,
}

impl MemoryReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemoryReport {
    fn record(&mut self, metrics: &RoundMetrics) -> Result<()> {
        self.rounds.push(*metrics);
        Ok(())
    }
}

/// Tab-separated report file, one line per round.
///
/// The first record creates the parent directory when missing and
/// (re)writes the header; later records append.
#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
    header_written: bool,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header_written: false,
        }
    }

    /// Report for a run over `graph_path`, placed in `output_dir` under the
    /// name given by [`report_file_name`].
    pub fn for_run(
        output_dir: impl AsRef<Path>,
        graph_path: impl AsRef<Path>,
        color_policy: InitialColorPolicy,
        config: &JabejaConfig,
    ) -> Self {
        Self::new(
            output_dir
                .as_ref()
                .join(report_file_name(graph_path, color_policy, config)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| JabejaError::io(dir, e))?;
        }
        let header = format!(
            "# Migration is number of nodes that have changed color.\n\n\
             Round{DELIMITER}Edge-Cut{DELIMITER}Swaps{DELIMITER}Migrations{DELIMITER}Skipped\n"
        );
        fs::write(&self.path, header).map_err(|e| JabejaError::io(&self.path, e))
    }
}

impl ReportSink for FileReport {
    fn record(&mut self, metrics: &RoundMetrics) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| JabejaError::io(&self.path, e))?;
        writeln!(
            file,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            metrics.round, metrics.edge_cut, metrics.swaps, metrics.migrations
        )
        .map_err(|e| JabejaError::io(&self.path, e))
    }
}

/// File name identifying a run by its input graph and parameters.
///
/// The annealing policy only appears for `Exponential` runs, so linear runs
/// keep the shorter historical names. Floats use Rust's `Debug` form
/// (`0.0001`), not Java's `1.0E-4`, so names of Java-based Ja-be-Ja runs
/// with small values differ.
///
/// ```
/// use u_jabeja::graph::InitialColorPolicy;
/// use u_jabeja::jabeja::JabejaConfig;
/// use u_jabeja::report::report_file_name;
///
/// let name = report_file_name("graphs/3elt", InitialColorPolicy::RoundRobin, &JabejaConfig::default());
/// assert_eq!(
///     name,
///     "3elt_NS_HYBRID_GICP_ROUND_ROBIN_T_2.0_D_0.003_RNSS_3_URSS_6_A_2.0_R_1000.txt"
/// );
/// ```
pub fn report_file_name(
    graph_path: impl AsRef<Path>,
    color_policy: InitialColorPolicy,
    config: &JabejaConfig,
) -> String {
    let base = graph_path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let annealing = match config.annealing {
        AnnealingPolicy::Linear => String::new(),
        AnnealingPolicy::Exponential => format!("ANN_{}_", config.annealing),
    };

    format!(
        "{base}_NS_{}_GICP_{color_policy}_T_{:?}_D_{:?}_RNSS_{}_URSS_{}_A_{:?}_{annealing}R_{}.txt",
        config.node_selection,
        config.temperature,
        config.delta,
        config.neighbor_sample_size,
        config.random_sample_size,
        config.alpha,
        config.rounds,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(round: usize, edge_cut: usize, swaps: usize, migrations: usize) -> RoundMetrics {
        RoundMetrics {
            round,
            edge_cut,
            swaps,
            migrations,
        }
    }

    #[test]
    fn test_file_name_exponential_includes_policy() {
        let config = JabejaConfig::default()
            .with_annealing(AnnealingPolicy::Exponential)
            .with_delta(0.9)
            .with_rounds(50);
        let name = report_file_name("/data/add20", InitialColorPolicy::Random, &config);
        assert_eq!(
            name,
            "add20_NS_HYBRID_GICP_RANDOM_T_2.0_D_0.9_RNSS_3_URSS_6_A_2.0_ANN_EXPONENTIAL_R_50.txt"
        );
    }

    #[test]
    fn test_file_name_small_delta_is_plain_decimal() {
        let config = JabejaConfig::default()
            .with_annealing(AnnealingPolicy::Exponential)
            .with_delta(1e-4);
        let name = report_file_name("3elt", InitialColorPolicy::RoundRobin, &config);
        assert!(name.contains("_D_0.0001_"), "{name}");
    }

    #[test]
    fn test_file_report_header_then_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.txt");
        let mut report = FileReport::new(&path);

        report.record(&metrics(0, 10, 3, 2)).unwrap();
        report.record(&metrics(1, 8, 5, 4)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# Migration is number of nodes that have changed color.\n\n\
             Round\t\tEdge-Cut\t\tSwaps\t\tMigrations\t\tSkipped\n\
             0\t\t10\t\t3\t\t2\n\
             1\t\t8\t\t5\t\t4\n"
        );
    }

    #[test]
    fn test_file_report_truncates_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        fs::write(&path, "old contents\n").unwrap();

        let mut report = FileReport::new(&path);
        report.record(&metrics(0, 1, 1, 1)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# Migration"));
        assert!(!contents.contains("old contents"));
    }

    #[test]
    fn test_file_report_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut report = FileReport::new(blocker.join("run.txt"));
        let err = report.record(&metrics(0, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, JabejaError::Io { .. }));
    }

    #[test]
    fn test_for_run_joins_output_dir() {
        let report = FileReport::for_run(
            "out",
            "graphs/3elt",
            InitialColorPolicy::Batch,
            &JabejaConfig::default(),
        );
        assert!(report.path().starts_with("out"));
        assert!(report
            .path()
            .to_string_lossy()
            .contains("_GICP_BATCH_"));
    }

    #[test]
    fn test_memory_report_collects() {
        let mut report = MemoryReport::new();
        report.record(&metrics(0, 1, 2, 3)).unwrap();
        assert_eq!(report.rounds, vec![metrics(0, 1, 2, 3)]);
    }
}
