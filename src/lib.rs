//! Deptviz - department distribution reports
//!
//! Features:
//! - Loads `employees.csv` or synthesizes a reproducible employee table
//! - Tallies any categorical column, department by default
//! - Draws an SVG bar chart of the tally
//! - Writes a single self-contained HTML report

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;

pub use aggregate::{aggregate, count_by_department, tally, Aggregation, CategoryColumn, CountMapping};
pub use chart::{ChartRenderer, RenderedChart, SvgBarChart};
pub use config::{ConfigBuilder, DeptvizConfig};
pub use data::{read_csv, synthesize, DataSource, Dataset, EmployeeRecord};
pub use error::{VizError, VizResult};
pub use pipeline::{Pipeline, RunSummary};
pub use report::{Report, ReportWriter};

use tracing::Level;

/// Install the stderr log subscriber. Calling it again is a no-op.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let initialized = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if initialized {
        tracing::debug!("deptviz {} logging initialized", version());
    }
}

/// Get the current crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
