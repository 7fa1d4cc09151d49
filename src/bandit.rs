use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{BanditError, Result};
use crate::policies::{AdaptivePlay, Policy, Ucb};
use crate::reward::Reward;

/// Learning policy configuration for [`BanditBuilder`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LearningPolicy {
    /// Adaptive play with learning rate `eta`
    AdaptivePlay { eta: f64 },
    /// UCB1 with forced initial exploration
    Ucb,
}

impl LearningPolicy {
    /// Builds the configured policy over `n_arms` arms
    pub fn build(self, n_arms: usize) -> Result<Box<dyn Policy>> {
        Ok(match self {
            LearningPolicy::AdaptivePlay { eta } => Box::new(AdaptivePlay::new(n_arms, eta)?),
            LearningPolicy::Ucb => Box::new(Ucb::new(n_arms)?),
        })
    }
}

/// A multi-armed bandit: a policy together with its own random source
///
/// The bandit owns every piece of its state. Two bandits built with the same
/// policy configuration and seed, fed the same rewards, make the same choices.
pub struct Bandit<P = Box<dyn Policy>> {
    policy: P,
    rng: StdRng,
}

impl<P: Policy> Bandit<P> {
    /// Creates a new bandit with the given policy and seed
    pub fn new(policy: P, seed: u64) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a new bandit seeded from the operating system
    pub fn from_os_rng(policy: P) -> Self {
        Self {
            policy,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Select an arm
    pub fn select(&mut self) -> usize {
        self.policy.select(&mut self.rng)
    }

    /// Feed back the reward observed for `arm`
    pub fn update(&mut self, arm: usize, reward: impl Into<Reward>) -> Result<()> {
        self.policy.update(arm, reward.into())
    }

    /// Get the policy's per-arm observable state
    pub fn expectations(&self) -> Vec<f64> {
        self.policy.expectations()
    }

    /// Gets the number of arms
    pub fn n_arms(&self) -> usize {
        self.policy.n_arms()
    }

    /// Gets a reference to the policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Reset the policy's statistics; the random stream continues
    pub fn reset(&mut self) {
        self.policy.reset();
    }
}

impl Bandit<AdaptivePlay> {
    /// Create an adaptive play bandit
    pub fn adaptive_play(n_arms: usize, eta: f64, seed: u64) -> Result<Self> {
        Ok(Self::new(AdaptivePlay::new(n_arms, eta)?, seed))
    }
}

impl Bandit<Ucb> {
    /// Create a UCB1 bandit
    pub fn ucb(k: usize, seed: u64) -> Result<Self> {
        Ok(Self::new(Ucb::new(k)?, seed))
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for Bandit<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bandit")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Builder for creating bandits with a fluent API
#[derive(Clone, Debug, Default)]
pub struct BanditBuilder {
    arms: Option<usize>,
    policy: Option<LearningPolicy>,
    seed: Option<u64>,
}

impl BanditBuilder {
    /// Set the number of arms
    pub fn arms(mut self, n_arms: usize) -> Self {
        self.arms = Some(n_arms);
        self
    }

    /// Set the learning policy
    pub fn policy(mut self, policy: LearningPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Seed the bandit's random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the bandit
    pub fn build(self) -> Result<Bandit> {
        let arms = self.arms.ok_or(BanditError::BuilderError {
            message: "Arms not specified".into(),
        })?;

        let policy = self.policy.ok_or(BanditError::BuilderError {
            message: "Policy not specified".into(),
        })?;

        let policy = policy.build(arms)?;
        Ok(match self.seed {
            Some(seed) => Bandit::new(policy, seed),
            None => Bandit::from_os_rng(policy),
        })
    }
}

impl Bandit {
    /// Create a new builder for constructing a bandit
    pub fn builder() -> BanditBuilder {
        BanditBuilder::default()
    }
}
