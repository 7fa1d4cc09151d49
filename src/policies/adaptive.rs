use tracing::warn;

use crate::error::{BanditError, Result};
use crate::policy::Policy;
use crate::reward::Reward;

/// Upper clip applied to the chosen arm's weight before the update rule.
/// At exactly 1.0 both update formulas divide by zero.
pub const WEIGHT_CEILING: f64 = 0.9999;

/// Floor applied to every non-chosen arm after rescaling.
pub const MIN_WEIGHT: f64 = 0.001;

/// Lower bound on `1 - w` when rescaling the non-chosen arms.
pub const MIN_COMPLEMENT: f64 = 1e-4;

/// Adaptive play (APS) policy
///
/// A multiplicative-weights bandit from adaptive play in repeated games. Each
/// arm carries an unnormalized weight, initially 1.0, and arms are sampled in
/// proportion to their weights.
///
/// After observing reward `r` for the chosen arm with clipped weight
/// `w = min(weight, 0.9999)`, the chosen arm's weight becomes
///
/// - `(1 - e^-eta) / (1 - e^(-eta / w))` when `r` is a success,
/// - `(e^eta - 1) / (e^(eta / w) - 1)` when `r` is a failure,
///
/// and every other arm is rescaled by `(1 - new) / max(1 - w, 1e-4)` and
/// floored at `0.001`, which keeps relative proportions among the other arms
/// while moving the chosen arm's share. A success always moves the chosen
/// weight above `w` and a failure always moves it below.
#[derive(Clone, Debug)]
pub struct AdaptivePlay {
    /// Learning rate, fixed at construction
    eta: f64,
    /// Unnormalized weight per arm
    weights: Vec<f64>,
}

impl AdaptivePlay {
    /// Creates a new adaptive play policy over `n_arms` arms
    ///
    /// # Arguments
    /// * `n_arms` - Number of arms, at least one
    /// * `eta` - Learning rate; typical values lie in `[0.05, 0.08]`
    pub fn new(n_arms: usize, eta: f64) -> Result<Self> {
        if n_arms == 0 {
            return Err(BanditError::invalid_configuration(
                "adaptive play needs at least one arm",
            ));
        }
        if !(eta.is_finite() && eta > 0.0) {
            return Err(BanditError::invalid_configuration(format!(
                "eta must be positive and finite, got {eta}"
            )));
        }
        Ok(Self {
            eta,
            weights: vec![1.0; n_arms],
        })
    }

    /// Gets the learning rate
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Gets the unnormalized weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The weights normalized to a probability distribution
    pub fn probabilities(&self) -> Vec<f64> {
        let total: f64 = self.weights.iter().sum();
        self.weights.iter().map(|w| w / total).collect()
    }

    /// New weight of the chosen arm, given its clipped prior weight.
    fn chosen_weight(&self, clipped: f64, reward: Reward) -> f64 {
        let eta = self.eta;
        if reward.is_success() {
            (1.0 - (-eta).exp()) / (1.0 - (-eta / clipped).exp())
        } else {
            (eta.exp() - 1.0) / ((eta / clipped).exp() - 1.0)
        }
    }
}

/// Rescales a non-chosen arm's weight, then applies the floor.
fn rescale(arm: usize, weight: f64, adjustment: f64) -> Result<f64> {
    let scaled = weight * adjustment;
    if !scaled.is_finite() {
        return Err(BanditError::NumericDegeneracy {
            message: format!("rescaled weight of arm {arm} is {scaled} ({weight} x {adjustment})"),
        });
    }
    Ok(scaled.max(MIN_WEIGHT))
}

impl Policy for AdaptivePlay {
    fn n_arms(&self) -> usize {
        self.weights.len()
    }

    fn select(&self, rng: &mut dyn rand::RngCore) -> usize {
        let total: f64 = self.weights.iter().sum();
        let u: f64 = rand::Rng::random(rng);

        let mut cumulative = 0.0;
        for (arm, weight) in self.weights.iter().enumerate() {
            cumulative += weight / total;
            if cumulative > u {
                return arm;
            }
        }

        // Rounding can leave the final cumulative entry just below u
        self.weights.len() - 1
    }

    fn update(&mut self, arm: usize, reward: Reward) -> Result<()> {
        BanditError::check_arm(arm, self.weights.len())?;

        let clipped = self.weights[arm].min(WEIGHT_CEILING);
        let updated = self.chosen_weight(clipped, reward);
        if !updated.is_finite() {
            let err = BanditError::NumericDegeneracy {
                message: format!("weight of chosen arm {arm} became {updated} from {clipped}"),
            };
            warn!(arm, clipped, eta = self.eta, "{err}; skipping update");
            return Ok(());
        }
        // An underflowing failure update must not leave the arm unselectable
        self.weights[arm] = updated.max(f64::MIN_POSITIVE);

        let adjustment = (1.0 - self.weights[arm]) / (1.0 - clipped).max(MIN_COMPLEMENT);
        for (other, weight) in self.weights.iter_mut().enumerate() {
            if other == arm {
                continue;
            }
            match rescale(other, *weight, adjustment) {
                Ok(rescaled) => *weight = rescaled,
                Err(err) => warn!(arm = other, "{err}; keeping previous weight"),
            }
        }

        Ok(())
    }

    fn expectations(&self) -> Vec<f64> {
        self.probabilities()
    }

    fn reset(&mut self) {
        self.weights.fill(1.0);
    }
}
