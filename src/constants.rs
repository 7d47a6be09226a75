/// Represents the number of slot machines being played in k-armed bandit problem, it is the number k.
pub const NUM_OF_ARMS: usize = 10;
/// Represents the probability with which random action is selected. It reflects the probability
/// with which agent explores the action space. The probability that agent takes the action that
/// exploits the knowledge that it has learned is (1-EPSILON).
/// Epsilon is expected to be in bounds 0 <= EPSILON <= 1. When EPSILON = 0, agent always takes
/// greedy action. When EPSILON = 1, agent always takes exploratory action.
pub const EPSILON: f64 = 0.1;
/// Constant stepsize parameter of the exponential recency-weighted agent.
pub const ALPHA: f64 = 0.1;
/// Represents the number of steps in one run.
pub const NUM_OF_STEPS_IN_A_RUN: usize = 10_000;
/// Represent number of independent runs that are averaged together.
pub const NUM_OF_RUNS: usize = 300;
/// Variance of the noise around each arm's true value when a reward is drawn.
pub const REWARD_VARIANCE: f64 = 1.0;
/// Variance of the per-step increment of each arm's true value.
pub const RANDOM_WALK_VARIANCE: f64 = 0.01;
/// Number of final steps the console summary is averaged over.
pub const SUMMARY_WINDOW: usize = 1_000;
/// Prefix of environment variables that override the configuration, e.g. BANDIT_NUM_OF_RUNS.
pub const ENV_PREFIX: &str = "BANDIT";
