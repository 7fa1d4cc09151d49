use crate::error::{BanditError, Result};
use crate::policy::Policy;
use crate::reward::Reward;

/// Keeps the confidence bonus finite for arms that were never updated.
const COUNT_EPSILON: f64 = 1e-10;

/// Upper Confidence Bound (UCB1) policy
///
/// The first `k` selections play every arm once, in index order. After that
/// the policy picks the arm maximizing
/// `estimate + sqrt(2 ln(total_pulls) / count)`, breaking ties toward the
/// lowest index. Estimates are kept as incremental means.
#[derive(Clone, Debug)]
pub struct Ucb {
    /// Running mean reward per arm
    estimates: Vec<f64>,
    /// Pulls per arm
    counts: Vec<u64>,
    /// Sum of `counts`
    total_pulls: u64,
}

impl Ucb {
    /// Creates a new UCB1 policy over `k` arms
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::invalid_configuration(
                "ucb needs at least one arm",
            ));
        }
        Ok(Self {
            estimates: vec![0.0; k],
            counts: vec![0; k],
            total_pulls: 0,
        })
    }

    /// Gets the running mean reward per arm
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Gets the pull count per arm
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Gets the total number of pulls
    pub fn total_pulls(&self) -> u64 {
        self.total_pulls
    }

    /// Upper confidence bound of an arm at the current pull count
    pub fn ucb_score(&self, arm: usize) -> Option<f64> {
        let estimate = self.estimates.get(arm)?;
        let count = self.counts[arm] as f64;
        let exploration = (2.0 * (self.total_pulls as f64).ln() / (count + COUNT_EPSILON)).sqrt();
        Some(estimate + exploration)
    }

    /// Gets the statistics for a specific arm: pulls, estimate and UCB score
    pub fn arm_stats(&self, arm: usize) -> Option<(u64, f64, f64)> {
        let score = self.ucb_score(arm)?;
        Some((self.counts[arm], self.estimates[arm], score))
    }
}

impl Policy for Ucb {
    fn n_arms(&self) -> usize {
        self.estimates.len()
    }

    fn select(&self, _rng: &mut dyn rand::RngCore) -> usize {
        let k = self.estimates.len();
        if self.total_pulls < k as u64 {
            return self.total_pulls as usize;
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for arm in 0..k {
            let score = self.ucb_score(arm).unwrap_or(f64::NEG_INFINITY);
            if score > best_score {
                best = arm;
                best_score = score;
            }
        }
        best
    }

    fn update(&mut self, arm: usize, reward: Reward) -> Result<()> {
        BanditError::check_arm(arm, self.estimates.len())?;

        self.counts[arm] += 1;
        let estimate = &mut self.estimates[arm];
        *estimate += (reward.value() - *estimate) / self.counts[arm] as f64;
        self.total_pulls += 1;
        Ok(())
    }

    fn expectations(&self) -> Vec<f64> {
        self.estimates.clone()
    }

    fn reset(&mut self) {
        self.estimates.fill(0.0);
        self.counts.fill(0);
        self.total_pulls = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::abs_diff_eq;
    use rand::SeedableRng;

    #[test]
    fn test_ucb_construction() {
        let policy = Ucb::new(3).unwrap();
        assert_eq!(policy.n_arms(), 3);
        assert_eq!(policy.estimates(), &[0.0; 3]);
        assert_eq!(policy.counts(), &[0; 3]);
        assert_eq!(policy.total_pulls(), 0);

        assert!(matches!(
            Ucb::new(0),
            Err(BanditError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_ucb_explores_arms_in_order() {
        let mut policy = Ucb::new(5).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        for (expected, reward) in [true, false, false, true, true].into_iter().enumerate() {
            let arm = policy.select(&mut rng);
            assert_eq!(arm, expected);
            policy.update(arm, Reward::from(reward)).unwrap();
        }
    }

    #[test]
    fn test_ucb_incremental_mean() {
        let mut policy = Ucb::new(2).unwrap();
        let rewards = [1i32, 0, 1, 1, 0, 1, 1];
        for reward in rewards {
            policy.update(1, Reward::from(reward)).unwrap();
        }

        let expected = 5.0 / 7.0;
        assert!(abs_diff_eq!(policy.estimates()[1], expected, epsilon = 1e-12));
        assert_eq!(policy.counts(), &[0, 7]);
        assert_eq!(policy.total_pulls(), 7);
    }

    #[test]
    fn test_ucb_exploits_best_arm() {
        let mut policy = Ucb::new(3).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);

        for _ in 0..30 {
            policy.update(0, Reward::FAILURE).unwrap();
            policy.update(1, Reward::SUCCESS).unwrap();
            policy.update(2, Reward::FAILURE).unwrap();
        }

        assert_eq!(policy.select(&mut rng), 1);
    }

    #[test]
    fn test_ucb_ties_break_to_lowest_index() {
        let mut policy = Ucb::new(3).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for arm in 0..3 {
            policy.update(arm, Reward::SUCCESS).unwrap();
        }
        assert_eq!(policy.select(&mut rng), 0);
    }

    #[test]
    fn test_ucb_prefers_unpulled_arm_after_exploration() {
        let mut policy = Ucb::new(2).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        policy.update(0, Reward::SUCCESS).unwrap();
        policy.update(0, Reward::SUCCESS).unwrap();

        // Arm 1 has never been pulled, so its bonus dominates
        assert_eq!(policy.select(&mut rng), 1);
    }

    #[test]
    fn test_ucb_select_ignores_rng() {
        let mut policy = Ucb::new(3).unwrap();
        for (arm, reward) in [(0, 1i32), (1, 0), (2, 1), (0, 1), (2, 0)] {
            policy.update(arm, Reward::from(reward)).unwrap();
        }

        let mut rng1 = rand::rngs::StdRng::seed_from_u64(1);
        let mut rng2 = rand::rngs::StdRng::seed_from_u64(999);
        assert_eq!(policy.select(&mut rng1), policy.select(&mut rng2));
    }

    #[test]
    fn test_ucb_arm_stats() {
        let mut policy = Ucb::new(2).unwrap();
        assert_eq!(policy.arm_stats(5), None);

        policy.update(0, Reward::SUCCESS).unwrap();
        policy.update(0, Reward::FAILURE).unwrap();
        policy.update(1, Reward::SUCCESS).unwrap();

        let (pulls, estimate, score) = policy.arm_stats(0).unwrap();
        assert_eq!(pulls, 2);
        assert!(abs_diff_eq!(estimate, 0.5));
        assert!(score > 0.5);
    }

    #[test]
    fn test_ucb_invalid_arm_and_reset() {
        let mut policy = Ucb::new(2).unwrap();
        policy.update(1, Reward::SUCCESS).unwrap();

        assert_eq!(
            policy.update(2, Reward::SUCCESS),
            Err(BanditError::ArmOutOfRange { arm: 2, n_arms: 2 })
        );
        assert_eq!(policy.total_pulls(), 1);
        assert_eq!(policy.counts(), &[0, 1]);

        policy.reset();
        assert_eq!(policy.total_pulls(), 0);
        assert_eq!(policy.estimates(), &[0.0, 0.0]);
    }
}
