use rand::{ rngs::StdRng, Rng, SeedableRng };
use rayon::prelude::*;
use tracing::{ debug, info, trace };

use crate::agents::{ ConstantStepSizeAgent, LearningAgent, SampleAverageAgent };
use crate::config::{ OptimalityCriterion, SimulationConfig };
use crate::environments::random_walk::{ argmax, RandomWalkEnvironment };
use crate::error::Result;

/// Per-step metrics of one agent. Index represents the step in the run.
#[derive(PartialEq, Debug, Clone)]
pub struct AgentSeries {
    /// Reward received at each step.
    pub rewards: Vec<f64>,
    /// 1.0 when the action taken at the step was the optimal one, 0.0 otherwise.
    pub optimal_actions: Vec<f64>,
}

impl AgentSeries {
    pub fn zeros(num_of_steps: usize) -> Self {
        AgentSeries {
            rewards: vec![0.0; num_of_steps],
            optimal_actions: vec![0.0; num_of_steps],
        }
    }

    fn record(&mut self, step: usize, reward: f64, is_optimal: bool) {
        self.rewards[step] = reward;
        self.optimal_actions[step] = if is_optimal { 1.0 } else { 0.0 };
    }

    fn add(&mut self, other: &AgentSeries) {
        add_elementwise(&mut self.rewards, &other.rewards);
        add_elementwise(&mut self.optimal_actions, &other.optimal_actions);
    }

    fn divide(&mut self, divisor: f64) {
        self.rewards.iter_mut().for_each(|value| *value /= divisor);
        self.optimal_actions.iter_mut().for_each(|value| *value /= divisor);
    }
}

fn add_elementwise(total: &mut [f64], values: &[f64]) {
    for (total, value) in total.iter_mut().zip(values) {
        *total += value;
    }
}

/// Metrics of both agents for one run.
#[derive(PartialEq, Debug, Clone)]
pub struct RunOutcome {
    pub sample_average: AgentSeries,
    pub constant_step_size: AgentSeries,
}

/// Metrics of both agents averaged over all runs of an experiment.
#[derive(PartialEq, Debug, Clone)]
pub struct ExperimentResults {
    pub num_of_runs: usize,
    pub sample_average: AgentSeries,
    pub constant_step_size: AgentSeries,
}

impl ExperimentResults {
    /// The four series in output order: sample average rewards, sample average optimal
    /// fraction, constant step size rewards, constant step size optimal fraction.
    pub fn as_rows(&self) -> [&[f64]; 4] {
        [
            &self.sample_average.rewards,
            &self.sample_average.optimal_actions,
            &self.constant_step_size.rewards,
            &self.constant_step_size.optimal_actions,
        ]
    }

    pub fn num_of_steps(&self) -> usize {
        self.sample_average.rewards.len()
    }
}

/// Plays one run. Both agents start from scratch and see the same environment and the
/// same reward vector at every step, but neither sees the other's choices.
pub fn run_one_game<R: Rng + ?Sized>(
    config: &SimulationConfig,
    environment: &RandomWalkEnvironment,
    rng: &mut R
) -> RunOutcome {
    let num_of_steps = environment.num_of_steps();
    let num_of_arms = environment.num_of_arms();
    let reward_std_dev = config.reward_std_dev();

    let mut sample_average_agent = SampleAverageAgent::new(num_of_arms);
    let mut constant_step_size_agent = ConstantStepSizeAgent::new(num_of_arms, config.alpha);
    let mut outcome = RunOutcome {
        sample_average: AgentSeries::zeros(num_of_steps),
        constant_step_size: AgentSeries::zeros(num_of_steps),
    };

    for step in 0..num_of_steps {
        let rewards = environment.sample_rewards(step, reward_std_dev, rng);
        let optimal_action = match config.optimality {
            OptimalityCriterion::RealizedReward => argmax(&rewards),
            OptimalityCriterion::TrueValue => argmax(environment.true_values(step)),
        };

        let action = sample_average_agent.select_action(config.epsilon, rng);
        sample_average_agent.update_value_function(action, rewards[action]);
        outcome.sample_average.record(step, rewards[action], action == optimal_action);

        let action = constant_step_size_agent.select_action(config.epsilon, rng);
        constant_step_size_agent.update_value_function(action, rewards[action]);
        outcome.constant_step_size.record(step, rewards[action], action == optimal_action);

        trace!(step, optimal_action, "step played");
    }
    trace!(
        selections = ?sample_average_agent.num_times_arm_selected(),
        "sample average agent selections in run"
    );

    outcome
}

/// Generates a fresh environment from `seed` and plays one run in it.
pub fn run_seeded_game(config: &SimulationConfig, seed: u64) -> RunOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let environment = RandomWalkEnvironment::generate(config, &mut rng);
    run_one_game(config, &environment, &mut rng)
}

/// Repeats independent runs and averages their per-step metrics.
pub struct ExperimentRunner {
    config: SimulationConfig,
}

impl ExperimentRunner {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(ExperimentRunner { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// One seed per run, drawn from the master seed (or OS entropy when none is set).
    pub fn run_seeds(&self) -> Vec<u64> {
        let mut master_rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..self.config.num_of_runs).map(|_| master_rng.gen()).collect()
    }

    /// Runs are summed in run order whether or not they are played in parallel, so a
    /// given master seed always produces the same results.
    pub fn run(&self) -> ExperimentResults {
        let config = &self.config;
        info!(
            arms = config.num_of_arms,
            steps = config.num_of_steps,
            runs = config.num_of_runs,
            epsilon = config.epsilon,
            alpha = config.alpha,
            parallel = config.parallel,
            "Running nonstationary bandit experiment"
        );

        let mut sample_average = AgentSeries::zeros(config.num_of_steps);
        let mut constant_step_size = AgentSeries::zeros(config.num_of_steps);
        let mut accumulate = |run: usize, outcome: &RunOutcome| {
            sample_average.add(&outcome.sample_average);
            constant_step_size.add(&outcome.constant_step_size);
            debug!(run, "run finished");
        };

        let seeds = self.run_seeds();
        if config.parallel {
            // Bounded batches keep at most one outcome per worker in memory.
            let batch_size = rayon::current_num_threads().max(1);
            for (batch, batch_seeds) in seeds.chunks(batch_size).enumerate() {
                let outcomes: Vec<RunOutcome> = batch_seeds
                    .par_iter()
                    .map(|&seed| run_seeded_game(config, seed))
                    .collect();
                for (offset, outcome) in outcomes.iter().enumerate() {
                    accumulate(batch * batch_size + offset, outcome);
                }
            }
        } else {
            for (run, &seed) in seeds.iter().enumerate() {
                accumulate(run, &run_seeded_game(config, seed));
            }
        }

        let num_of_runs = config.num_of_runs as f64;
        sample_average.divide(num_of_runs);
        constant_step_size.divide(num_of_runs);

        ExperimentResults {
            num_of_runs: config.num_of_runs,
            sample_average,
            constant_step_size,
        }
    }
}
