use config::{ Config, Environment, File };
use serde::Deserialize;
use std::path::Path;

use crate::constants::{
    ALPHA,
    ENV_PREFIX,
    EPSILON,
    NUM_OF_ARMS,
    NUM_OF_RUNS,
    NUM_OF_STEPS_IN_A_RUN,
    RANDOM_WALK_VARIANCE,
    REWARD_VARIANCE,
    SUMMARY_WINDOW,
};
use crate::error::{ Result, SimulationError };

/// Decides which arm counts as the optimal one at a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OptimalityCriterion {
    /// Arm with the largest sampled reward at the step. Noisy, but comparable with the
    /// published curves this experiment reproduces.
    #[default]
    RealizedReward,
    /// Arm with the largest true value at the step.
    TrueValue,
}

/// Immutable set of parameters for one experiment. Passed explicitly to the environment
/// generator, the run loop and the experiment runner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_of_arms: usize,
    /// Exploration probability, 0 <= epsilon <= 1.
    pub epsilon: f64,
    /// Step size of the constant step size agent.
    pub alpha: f64,
    pub num_of_steps: usize,
    pub num_of_runs: usize,
    pub reward_variance: f64,
    pub random_walk_variance: f64,
    /// Master seed. Every run receives its own seed derived from it. When none, the
    /// master generator is seeded from OS entropy.
    pub seed: Option<u64>,
    /// Play runs on the rayon thread pool.
    pub parallel: bool,
    pub optimality: OptimalityCriterion,
    /// Number of final steps averaged in the console summary.
    pub summary_window: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_of_arms: NUM_OF_ARMS,
            epsilon: EPSILON,
            alpha: ALPHA,
            num_of_steps: NUM_OF_STEPS_IN_A_RUN,
            num_of_runs: NUM_OF_RUNS,
            reward_variance: REWARD_VARIANCE,
            random_walk_variance: RANDOM_WALK_VARIANCE,
            seed: None,
            parallel: false,
            optimality: OptimalityCriterion::default(),
            summary_window: SUMMARY_WINDOW,
        }
    }
}

impl SimulationConfig {
    /// Layers the optional configuration file and `BANDIT_*` environment variables over
    /// the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<SimulationConfig>()?;
        Ok(config)
    }

    /// Rejects configurations the algorithm cannot run on.
    pub fn validate(&self) -> Result<()> {
        if self.num_of_arms < 1 {
            return Err(invalid("number of arms must be at least 1"));
        }
        if self.num_of_steps < 1 {
            return Err(invalid("number of steps must be at least 1"));
        }
        if self.num_of_runs < 1 {
            return Err(invalid("number of runs must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!("epsilon must be in the range [0, 1], got {}", self.epsilon)));
        }
        if !self.alpha.is_finite() {
            return Err(invalid(format!("alpha must be finite, got {}", self.alpha)));
        }
        for (name, variance) in [
            ("reward variance", self.reward_variance),
            ("random walk variance", self.random_walk_variance),
        ] {
            if !variance.is_finite() || variance < 0.0 {
                return Err(invalid(format!("{} must be finite and >= 0, got {}", name, variance)));
            }
        }
        Ok(())
    }

    pub fn reward_std_dev(&self) -> f64 {
        self.reward_variance.sqrt()
    }

    pub fn random_walk_std_dev(&self) -> f64 {
        self.random_walk_variance.sqrt()
    }
}

fn invalid(message: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig(message.into())
}
