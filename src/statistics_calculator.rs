use std::fs::OpenOptions;
use std::io::{ BufWriter, Write };
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::simulation_runner::ExperimentResults;

/// Column names of the results dataframe, in output order.
pub const SERIES_COLUMNS: [&str; 4] = ["sa_reward", "sa_optimal", "cr_reward", "cr_optimal"];

/// Appends the four averaged series to `path`, one series per line, values separated by
/// a single space. The file is created when missing and never truncated, so repeated
/// experiments accumulate in the same file.
pub fn append_results(path: &Path, results: &ExperimentResults) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut output = BufWriter::new(file);

    for row in results.as_rows() {
        let line = row
            .iter()
            .map(|value| format!("{:.18e}", value))
            .collect::<Vec<String>>()
            .join(" ");
        writeln!(output, "{}", line)?;
    }
    output.flush()?;

    info!(path = %path.display(), steps = results.num_of_steps(), "Results appended");
    Ok(())
}

/// One row per step, one column per series.
pub fn results_dataframe(results: &ExperimentResults) -> Result<DataFrame> {
    let steps: Vec<u64> = (0u64..).take(results.num_of_steps()).collect();
    let mut columns = vec![Series::new("step", steps)];
    for (name, row) in SERIES_COLUMNS.iter().zip(results.as_rows()) {
        columns.push(Series::new(name, row));
    }
    Ok(DataFrame::new(columns)?)
}

/// Mean of every series over the last `window` steps. A window longer than the run
/// covers the whole run.
pub fn summarise_final_window(results: &ExperimentResults, window: usize) -> Result<DataFrame> {
    let window = window.clamp(1, results.num_of_steps().max(1));
    let df = results_dataframe(results)?;
    let summary = df
        .tail(Some(window))
        .lazy()
        .select(
            SERIES_COLUMNS.iter()
                .map(|name| col(name).mean())
                .collect::<Vec<Expr>>()
        )
        .collect()?;
    Ok(summary)
}
