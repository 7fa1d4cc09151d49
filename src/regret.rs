//! Regret accounting for a single decision-maker.
//!
//! A [`RegretTracker`] accumulates per-round regret and keeps a snapshot of the
//! cumulative value after every round. The model type fixes how regret is
//! measured for the tracker's whole lifetime:
//!
//! - [`RewardTable`]: the gap between the best arm's reward probability and
//!   the chosen arm's.
//! - [`PayoffTable`]: the battle payoff of the realized exchange minus the
//!   lowest payoff player 1 could have received against any opponent action.

use crate::battle::{Action, Fighter};
use crate::error::{BanditError, Result, check_probabilities};

/// Running regret accumulator with a per-round history.
#[derive(Clone, Debug)]
pub struct RegretTracker<M> {
    model: M,
    cumulative: f64,
    last: Option<f64>,
    history: Vec<f64>,
}

impl<M> RegretTracker<M> {
    fn with_model(model: M) -> Self {
        Self {
            model,
            cumulative: 0.0,
            last: None,
            history: Vec::new(),
        }
    }

    fn commit(&mut self, regret: f64) -> f64 {
        self.cumulative += regret;
        self.last = Some(regret);
        self.history.push(self.cumulative);
        regret
    }

    /// Gets the regret accumulated so far
    pub fn cumulative_regret(&self) -> f64 {
        self.cumulative
    }

    /// Cumulative regret after each recorded round
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Gets the number of recorded rounds
    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Regret of the most recent round
    pub fn last_regret(&self) -> Option<f64> {
        self.last
    }

    /// Gets the regret model
    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Per-arm reward probabilities, known to the tracker but not the bandit.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardTable {
    probabilities: Vec<f64>,
    best_arm: usize,
}

impl RewardTable {
    /// Creates a table, rejecting empty tables and values outside `[0, 1]`.
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        check_probabilities(&probabilities)?;
        let mut best_arm = 0;
        for (arm, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best_arm] {
                best_arm = arm;
            }
        }
        Ok(Self {
            probabilities,
            best_arm,
        })
    }

    /// Gets the reward probability of every arm
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl RegretTracker<RewardTable> {
    /// Creates a tracker measuring regret against the best reward probability.
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        Ok(Self::with_model(RewardTable::new(probabilities)?))
    }

    /// Lowest-index arm with the highest reward probability
    pub fn best_arm(&self) -> usize {
        self.model.best_arm
    }

    /// Reward probability of the best arm
    pub fn optimal_probability(&self) -> f64 {
        self.model.probabilities[self.model.best_arm]
    }

    /// Records a round in which `arm` was pulled and returns its regret.
    ///
    /// An out-of-range arm is rejected without recording anything.
    pub fn record_round(&mut self, arm: usize) -> Result<f64> {
        let probabilities = &self.model.probabilities;
        BanditError::check_arm(arm, probabilities.len())?;
        let regret = self.optimal_probability() - probabilities[arm];
        Ok(self.commit(regret))
    }
}

/// Damage and cost constants of the battle game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoffTable {
    /// Damage dealt by a plain attack
    pub attack_damage: i32,
    /// Damage dealt by an affordable special power
    pub special_damage: i32,
    /// Gold a special power costs, and the gold needed to use one
    pub special_cost: i32,
    /// Damage absorbed by defending
    pub defend_reduction: i32,
    /// Gold earned by building gold
    pub gold_income: i32,
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self {
            attack_damage: 10,
            special_damage: 20,
            special_cost: 50,
            defend_reduction: 5,
            gold_income: 10,
        }
    }
}

impl PayoffTable {
    /// Player 1's remaining health if player 2 answers with `player2_action`.
    ///
    /// Only player 2's gold matters on that side: it gates the special power.
    pub fn payoff(
        &self,
        player1_action: Action,
        player2_action: Action,
        player1: Fighter,
        player2: Fighter,
    ) -> i32 {
        let mut damage = match player2_action {
            Action::Attack => self.attack_damage,
            Action::SpecialPower if player2.gold >= self.special_cost => self.special_damage,
            _ => 0,
        };
        if player1_action == Action::Defend {
            damage = (damage - self.defend_reduction).max(0);
        }
        (player1.health - damage).max(0)
    }
}

impl RegretTracker<PayoffTable> {
    /// Creates a tracker measuring battle regret with the given constants.
    pub fn battle(payoffs: PayoffTable) -> Self {
        Self::with_model(payoffs)
    }

    /// Records one exchange and returns its regret.
    ///
    /// Regret is the realized payoff minus the minimum payoff over every
    /// action player 2 could have taken, so it measures distance from the
    /// worst case rather than from the best.
    // FIXME: inverted relative to the usual best-minus-actual regret.
    pub fn record_exchange(
        &mut self,
        player1_action: Action,
        player2_action: Action,
        player1: Fighter,
        player2: Fighter,
    ) -> f64 {
        let payoffs = self.model;
        let worst = Action::ALL
            .iter()
            .map(|&candidate| payoffs.payoff(player1_action, candidate, player1, player2))
            .min()
            .unwrap_or_default();
        let actual = payoffs.payoff(player1_action, player2_action, player1, player2);
        self.commit(f64::from(actual - worst))
    }
}
