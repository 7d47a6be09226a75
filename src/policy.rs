use rand::Rng;
use tracing::trace;

use crate::environments::random_walk::{
    argmax,
    generate_random_number_in_range,
    generate_uniform_random_number,
};

/// Action selection policy: epsilon greedy.
/// Epsilon bounds: 0 <= epsilon <= 1.
/// Actions are selected greedily with probability of (1 - epsilon), exploiting what the
/// agent has learned. With probability epsilon an arm is picked uniformly at random.
/// When epsilon = 0 the random branch is never taken, when epsilon = 1 it always is.
pub fn epsilon_greedy_action_selection_policy<R: Rng + ?Sized>(
    q_values: &[f64],
    epsilon: f64,
    rng: &mut R
) -> usize {
    let number = generate_uniform_random_number(rng);
    if number < epsilon {
        return random_action_selection_policy(q_values.len(), rng);
    }
    greedy_action_selection_policy(q_values)
}

/// Every arm is equally likely.
pub fn random_action_selection_policy<R: Rng + ?Sized>(num_of_arms: usize, rng: &mut R) -> usize {
    let action = generate_random_number_in_range(rng, 0, num_of_arms);
    trace!(action, "random action selected");
    action
}

/// Arm with the largest estimate. Ties go to the lowest index so that runs are
/// reproducible for a given seed.
pub fn greedy_action_selection_policy(q_values: &[f64]) -> usize {
    let action = argmax(q_values);
    trace!(action, max_q_value = q_values[action], "greedy action selected");
    action
}

#[cfg(test)]
mod test {
    use rand::{ rngs::StdRng, SeedableRng };

    use super::*;

    const SEED: u64 = 1234;

    #[test]
    fn test_greedy_policy_when_one_value_is_the_best() {
        let mut q_values = vec![0.0; 10];
        q_values[3] = 0.9;

        assert_eq!(greedy_action_selection_policy(&q_values), 3);
    }

    #[test]
    fn test_greedy_policy_when_more_than_one_action_is_the_best() {
        let mut q_values = vec![0.0; 10];
        q_values[4] = 0.9;
        q_values[7] = 0.9;

        assert_eq!(greedy_action_selection_policy(&q_values), 4);
    }

    #[test]
    fn test_epsilon_zero_always_returns_greedy_action() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let q_values = vec![0.1, -0.3, 0.7, 0.2];

        for _ in 0..10_000 {
            assert_eq!(epsilon_greedy_action_selection_policy(&q_values, 0.0, &mut rng), 2);
        }
    }

    #[test]
    fn test_epsilon_one_always_explores_uniformly() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let q_values = vec![0.0, 0.0, 5.0, 0.0, 0.0];
        let turns = 50_000;

        let mut frequency = vec![0; q_values.len()];
        for _ in 0..turns {
            let action = epsilon_greedy_action_selection_policy(&q_values, 1.0, &mut rng);
            assert!(action < q_values.len());
            frequency[action] += 1;
        }

        // Greedy choice would be arm 2 every time, uniform exploration gives ~20% each.
        let expected_range = 9_000..11_000;
        for (arm, count) in frequency.iter().enumerate() {
            assert!(
                expected_range.contains(count),
                "Arm {} selected {} times, expected within {:?}",
                arm,
                count,
                expected_range
            );
        }
    }

    #[test]
    fn test_epsilon_greedy_action_selection_policy() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let epsilon = 0.1;
        let turns = 100_000;
        let q_values = vec![0.2, 0.5, 0.9, 0.1];

        let greedy_taken = (0..turns)
            .filter(|_| epsilon_greedy_action_selection_policy(&q_values, epsilon, &mut rng) == 2)
            .count() as f64;

        // Greedy arm is taken with probability 1 - epsilon + epsilon / k.
        let expected = (1.0 - epsilon + epsilon / 4.0) * (turns as f64);
        assert!(
            (greedy_taken - expected).abs() < 0.01 * (turns as f64),
            "Greedy action taken {} times, expected about {}",
            greedy_taken,
            expected
        );
    }

    #[test]
    fn test_random_action_within_the_range_returned() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let num_of_arms = 10;
        let num_of_turns = 10_000;
        let expected_mean = ((num_of_arms as f64) - 1.0) / 2.0;
        let expected_range = expected_mean - 0.5..expected_mean + 0.5;

        let mut sum_of_actions = 0;
        for _ in 0..num_of_turns {
            let action = random_action_selection_policy(num_of_arms, &mut rng);
            assert!(action < num_of_arms);
            sum_of_actions += action;
        }
        let actual_mean = (sum_of_actions as f64) / (num_of_turns as f64);

        assert!(expected_range.contains(&actual_mean), "Actual mean is not within expected range.");
    }
}
