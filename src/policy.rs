//! Policy trait definition for multi-armed bandit algorithms

use crate::error::Result;
use crate::reward::Reward;

/// Arm-selection and arm-update contract shared by every bandit algorithm.
///
/// Arms are the indices `0..n_arms()`, fixed for the lifetime of a policy.
/// Randomness is always supplied by the caller, so two policies with the same
/// configuration driven by identically seeded generators and identical rewards
/// follow identical trajectories.
///
/// The trait is object-safe: `Box<dyn Policy>` also implements `Policy`, which
/// lets a host swap algorithms without touching the rest of its round loop.
pub trait Policy {
    /// Number of arms this policy chooses among
    fn n_arms(&self) -> usize;

    /// Select an arm
    ///
    /// # Arguments
    /// - `rng`: Random number generator for stochastic policies
    ///
    /// # Returns
    /// An arm index in `0..n_arms()`
    fn select(&self, rng: &mut dyn rand::RngCore) -> usize;

    /// Update the policy with the reward observed for `arm`
    ///
    /// Fails with [`crate::BanditError::ArmOutOfRange`] for an invalid arm,
    /// leaving the policy state untouched.
    fn update(&mut self, arm: usize, reward: Reward) -> Result<()>;

    /// Per-arm observable state, one entry per arm
    fn expectations(&self) -> Vec<f64>;

    /// Reset all statistics to their freshly constructed values
    fn reset(&mut self);
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn n_arms(&self) -> usize {
        (**self).n_arms()
    }

    fn select(&self, rng: &mut dyn rand::RngCore) -> usize {
        (**self).select(rng)
    }

    fn update(&mut self, arm: usize, reward: Reward) -> Result<()> {
        (**self).update(arm, reward)
    }

    fn expectations(&self) -> Vec<f64> {
        (**self).expectations()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
