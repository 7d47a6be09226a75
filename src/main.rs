mod agents;
mod cli;
mod config;
mod constants;
mod environments;
mod error;
mod policy;
mod simulation_runner;
mod statistics_calculator;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{ error, info, warn };
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::simulation_runner::{ ExperimentResults, ExperimentRunner };
use crate::statistics_calculator::{ append_results, summarise_final_window };

/// Logs go to stderr, stdout only carries the elapsed time.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Logs the final-window means. Failing to build the summary never fails the experiment,
/// whose results are already on disk by then.
fn log_window_summary(results: &ExperimentResults, window: usize) {
    match summarise_final_window(results, window) {
        Ok(summary) => info!("Mean over the final {} steps:\n{}", window, summary),
        Err(err) => warn!("Cannot summarise results: {}", err),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply_overrides(SimulationConfig::load(cli.config.as_deref())?);
    let runner = ExperimentRunner::new(config)?;

    let start_time = Instant::now();
    let results = runner.run();
    append_results(&cli.output, &results)?;
    let elapsed_time = start_time.elapsed();

    info!("Elapsed time: {:.2?}", elapsed_time);
    println!("{}", elapsed_time.as_secs_f64());
    log_window_summary(&results, runner.config().summary_window);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
