use rand::Rng;
use tracing::trace;

use crate::policy::epsilon_greedy_action_selection_policy;

/// Learns an estimate of every arm's value from the rewards it observes and picks arms
/// epsilon-greedily on those estimates.
pub trait LearningAgent {
    /// Current estimate per arm. Index is the arm number.
    fn q_values(&self) -> &[f64];

    /// new_estimate = old_estimate + step_size (target - old_estimate)
    fn update_value_function(&mut self, action: usize, reward: f64);

    fn select_action<R: Rng + ?Sized>(&self, epsilon: f64, rng: &mut R) -> usize {
        epsilon_greedy_action_selection_policy(self.q_values(), epsilon, rng)
    }
}

/// Estimates are the plain mean of all rewards seen for the arm, i.e. the step size of
/// each update is 1/n where n is how many times the arm was selected.
#[derive(PartialEq, Debug, Clone)]
pub struct SampleAverageAgent {
    q_values: Vec<f64>,
    /// Number of times each arm was selected in the current run.
    num_times_arm_selected: Vec<usize>,
}

impl SampleAverageAgent {
    pub fn new(num_of_arms: usize) -> Self {
        SampleAverageAgent {
            q_values: vec![0.0; num_of_arms],
            num_times_arm_selected: vec![0; num_of_arms],
        }
    }

    pub fn num_times_arm_selected(&self) -> &[usize] {
        &self.num_times_arm_selected
    }
}

impl LearningAgent for SampleAverageAgent {
    fn q_values(&self) -> &[f64] {
        &self.q_values
    }

    fn update_value_function(&mut self, action: usize, reward: f64) {
        // Count is incremented first, so it is never zero below.
        self.num_times_arm_selected[action] += 1;
        let step_size = 1.0 / (self.num_times_arm_selected[action] as f64);
        self.q_values[action] += step_size * (reward - self.q_values[action]);
        trace!(action, reward, step_size, q_value = self.q_values[action], "sample average update");
    }
}

/// Exponential recency-weighted average: every update moves the estimate a fixed
/// fraction alpha of the way towards the reward, so recent rewards weigh more. This
/// is what lets the agent follow arms whose value drifts.
#[derive(PartialEq, Debug, Clone)]
pub struct ConstantStepSizeAgent {
    q_values: Vec<f64>,
    alpha: f64,
}

impl ConstantStepSizeAgent {
    pub fn new(num_of_arms: usize, alpha: f64) -> Self {
        ConstantStepSizeAgent {
            q_values: vec![0.0; num_of_arms],
            alpha,
        }
    }
}

impl LearningAgent for ConstantStepSizeAgent {
    fn q_values(&self) -> &[f64] {
        &self.q_values
    }

    fn update_value_function(&mut self, action: usize, reward: f64) {
        self.q_values[action] += self.alpha * (reward - self.q_values[action]);
        trace!(action, reward, alpha = self.alpha, q_value = self.q_values[action], "constant step update");
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::{ rngs::StdRng, SeedableRng };

    use super::*;

    #[test]
    fn test_creation_of_agents() {
        let sample_average = SampleAverageAgent::new(10);
        let constant = ConstantStepSizeAgent::new(10, 0.1);

        assert_eq!(sample_average.q_values(), vec![0.0; 10].as_slice());
        assert_eq!(sample_average.num_times_arm_selected(), vec![0; 10].as_slice());
        assert_eq!(constant.q_values(), vec![0.0; 10].as_slice());
        assert_eq!(constant.alpha, 0.1);
    }

    #[test]
    fn test_sample_average_estimate_is_mean_of_rewards() {
        let mut agent = SampleAverageAgent::new(3);
        let rewards_for_arm_1 = [2.0, -1.0, 4.5, 0.25, 3.0];
        let rewards_for_arm_2 = [10.0, 20.0];

        for (n, &reward) in rewards_for_arm_1.iter().enumerate() {
            agent.update_value_function(1, reward);

            let expected = rewards_for_arm_1[..=n].iter().sum::<f64>() / ((n + 1) as f64);
            assert_relative_eq!(agent.q_values()[1], expected, epsilon = 1e-12);
        }
        for &reward in &rewards_for_arm_2 {
            agent.update_value_function(2, reward);
        }

        assert_eq!(agent.num_times_arm_selected(), &[0, 5, 2]);
        assert_eq!(agent.q_values()[0], 0.0);
        assert_relative_eq!(agent.q_values()[2], 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_sample_average_update_equals_reward() {
        let mut agent = SampleAverageAgent::new(2);

        agent.update_value_function(0, 1.0);
        agent.update_value_function(0, 1.0);

        assert_eq!(agent.num_times_arm_selected()[0], 2);
        assert_eq!(agent.q_values()[0], 1.0);
    }

    #[test]
    fn test_constant_step_size_update() {
        let action = 0;
        let reward = 1.0;
        let alpha = 0.1;
        let mut agent = ConstantStepSizeAgent::new(10, alpha);
        let mut expected_after_1_update = vec![0.0; 10];
        expected_after_1_update[action] += alpha * reward;
        let mut expected_after_2_update = expected_after_1_update.clone();
        expected_after_2_update[action] += alpha * (reward - expected_after_1_update[action]);

        agent.update_value_function(action, reward);
        assert_eq!(agent.q_values(), expected_after_1_update.as_slice());

        agent.update_value_function(action, reward);
        assert_eq!(agent.q_values(), expected_after_2_update.as_slice());
    }

    #[test]
    fn test_constant_step_size_update_from_non_zero_estimate() {
        let mut agent = ConstantStepSizeAgent::new(2, 0.3);
        agent.update_value_function(1, 2.0);
        let v = agent.q_values()[1];
        let r = -4.0;

        agent.update_value_function(1, r);

        assert_eq!(agent.q_values()[1], v + 0.3 * (r - v));
    }

    #[test]
    fn test_greedy_agent_selects_best_estimate() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut agent = ConstantStepSizeAgent::new(4, 1.0);
        agent.update_value_function(3, 0.7);

        for _ in 0..100 {
            assert_eq!(agent.select_action(0.0, &mut rng), 3);
        }
    }
}
