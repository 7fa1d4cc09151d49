//! Ground-truth environments that turn arm pulls into rewards.

use rand_distr::{Bernoulli, Distribution};

use crate::error::{BanditError, Result, check_probabilities};
use crate::reward::Reward;

/// Arms with fixed, independent success probabilities.
#[derive(Clone, Debug)]
pub struct BernoulliArms {
    probabilities: Vec<f64>,
    arms: Vec<Bernoulli>,
}

impl BernoulliArms {
    /// Creates an environment with one Bernoulli arm per probability.
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        check_probabilities(&probabilities)?;
        let arms = probabilities
            .iter()
            .map(|&p| {
                Bernoulli::new(p).map_err(|err| BanditError::InvalidConfiguration {
                    message: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            probabilities,
            arms,
        })
    }

    /// Gets the success probability of every arm
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Gets the number of arms
    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// Pull `arm` and sample its reward.
    pub fn pull(&self, arm: usize, rng: &mut dyn rand::RngCore) -> Result<Reward> {
        BanditError::check_arm(arm, self.arms.len())?;
        Ok(Reward::from(self.arms[arm].sample(rng)))
    }
}
