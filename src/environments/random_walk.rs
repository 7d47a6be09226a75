use rand::Rng;
use rand_distr::{ Distribution, Normal };
use tracing::trace;

use crate::config::SimulationConfig;

/// Generates random number in range: [0; 1)
pub fn generate_uniform_random_number<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen()
}

/// Generates random number in range: [min, max)
pub fn generate_random_number_in_range<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    assert!(min < max, "Minimum number cannot be bigger than maximum number!");
    rng.gen_range(min..max)
}

/// Index of the largest value. When several values are equal to the maximum, the first
/// of them is returned.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}

/// Nonstationary k-armed bandit. The true value of every arm starts at zero and then
/// follows an independent gaussian random walk, so the identity of the best arm drifts
/// over the course of a run.
///
/// The whole trajectory is generated up front and never changes afterwards. Row `t`
/// holds the true value of each arm at step `t`.
#[derive(PartialEq, Debug, Clone)]
pub struct RandomWalkEnvironment {
    trajectory: Vec<Vec<f64>>,
}

impl RandomWalkEnvironment {
    /// Generates a fresh trajectory of `config.num_of_steps` steps for
    /// `config.num_of_arms` arms.
    pub fn generate<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Self {
        let increment = gaussian(0.0, config.random_walk_std_dev());
        let mut trajectory = Vec::with_capacity(config.num_of_steps);
        let mut values = vec![0.0; config.num_of_arms];
        trajectory.push(values.clone());

        for _ in 1..config.num_of_steps {
            for value in values.iter_mut() {
                *value += increment.sample(rng);
            }
            trajectory.push(values.clone());
        }

        Self::from_trajectory(trajectory)
    }

    /// Wraps an existing trajectory, e.g. a static environment where every step has the
    /// same true values.
    pub fn from_trajectory(trajectory: Vec<Vec<f64>>) -> Self {
        assert!(!trajectory.is_empty(), "Trajectory must contain at least one step.");
        let num_of_arms = trajectory[0].len();
        assert!(
            trajectory.iter().all(|values| values.len() == num_of_arms),
            "Every step of the trajectory must have the same number of arms."
        );
        RandomWalkEnvironment { trajectory }
    }

    pub fn num_of_steps(&self) -> usize {
        self.trajectory.len()
    }

    pub fn num_of_arms(&self) -> usize {
        self.trajectory[0].len()
    }

    /// True values of all arms at `step`.
    pub fn true_values(&self, step: usize) -> &[f64] {
        &self.trajectory[step]
    }

    /// Draws one reward per arm around the true values at `step`. Both agents are scored
    /// against the same vector.
    pub fn sample_rewards<R: Rng + ?Sized>(&self, step: usize, reward_std_dev: f64, rng: &mut R) -> Vec<f64> {
        let rewards: Vec<f64> = self.trajectory[step]
            .iter()
            .map(|&mean| gaussian(mean, reward_std_dev).sample(rng))
            .collect();
        trace!(step, ?rewards, "sampled rewards");
        rewards
    }
}

fn gaussian(mean: f64, std_dev: f64) -> Normal<f64> {
    // Standard deviations come from validated, non-negative variances.
    Normal::new(mean, std_dev).expect("Invalid Normal distribution")
}
