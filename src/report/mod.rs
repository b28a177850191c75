//! Round metrics and the report that records them.

mod metrics;
mod writer;

pub use metrics::{edge_cut, gray_links, migrations, RoundMetrics};
pub use writer::{report_file_name, FileReport, MemoryReport, ReportSink};
