use std::path::PathBuf;

use clap::Parser;

use crate::config::{ OptimalityCriterion, SimulationConfig };

/// Compares sample average and constant step size value estimates on a nonstationary
/// k-armed bandit and appends the averaged learning curves to a text file.
#[derive(Debug, Parser, Clone)]
#[command(version, about)]
pub struct Cli {
    /// File the four result series are appended to
    pub output: PathBuf,

    /// Configuration file (toml, json or yaml) layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of arms
    #[arg(long)]
    pub arms: Option<usize>,

    /// Exploration probability
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Step size of the constant step size agent
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Steps per run
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of independent runs
    #[arg(long)]
    pub runs: Option<usize>,

    /// Variance of the reward noise
    #[arg(long)]
    pub reward_variance: Option<f64>,

    /// Variance of the random walk increments
    #[arg(long)]
    pub walk_variance: Option<f64>,

    /// Master seed for reproducible experiments
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play runs on all cores
    #[arg(long)]
    pub parallel: bool,

    /// How the optimal arm of a step is decided
    #[arg(long, value_enum)]
    pub optimality: Option<OptimalityCriterion>,

    /// Log filter used when RUST_LOG is not set (`error`, `warn`, `info`, `debug`, `trace`)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Values given on the command line win over the file and the environment.
    pub fn apply_overrides(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(arms) = self.arms {
            config.num_of_arms = arms;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(steps) = self.steps {
            config.num_of_steps = steps;
        }
        if let Some(runs) = self.runs {
            config.num_of_runs = runs;
        }
        if let Some(variance) = self.reward_variance {
            config.reward_variance = variance;
        }
        if let Some(variance) = self.walk_variance {
            config.random_walk_variance = variance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(optimality) = self.optimality {
            config.optimality = optimality;
        }
        config
    }
}
