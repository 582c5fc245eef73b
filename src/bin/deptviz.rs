//! Deptviz CLI - writes the department distribution report for the working directory

use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

use deptviz::{
    config::{DeptvizConfig, DEFAULT_CONFIG_PATH},
    error::VizResult,
    init_logging, Pipeline, RunSummary,
};

fn run() -> VizResult<RunSummary> {
    let config = DeptvizConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?;
    init_logging(config.development.verbose_logging);
    info!("Deptviz v{}", deptviz::version());

    Pipeline::new(config).run()
}

fn main() -> ExitCode {
    match run() {
        Ok(summary) => {
            println!("{}", summary.count_line());
            println!("{}", summary.output_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            init_logging(false);
            error!(code = ?e.code(), "{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}
