//! Headless treasure hunt driven by a bandit.
//!
//! The board has one square quadrant per arm. Quadrant `q` hides
//! `round(max_treasures_per_quadrant * p_q)` treasures on distinct boxes, so
//! digging a random box there succeeds with probability close to `p_q`. Each
//! round the bandit picks a quadrant, the agent digs a random box in it, and
//! regret is measured against the configured probabilities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::bandit::Bandit;
use crate::error::{BanditError, Result};
use crate::policies::Policy;
use crate::regret::{RegretTracker, RewardTable};
use crate::reward::Reward;

/// Settings for a treasure hunt.
#[derive(Clone, Debug, PartialEq)]
pub struct TreasureHuntConfig {
    /// Treasure probability per quadrant; one quadrant per arm
    pub probabilities: Vec<f64>,
    /// Boxes along each side of a quadrant
    pub grid_side: usize,
    /// Treasures a quadrant would hold at probability one
    pub max_treasures_per_quadrant: usize,
    /// Number of rounds `run` plays
    pub rounds: usize,
    /// Seed for treasure placement, digging and the bandit
    pub seed: u64,
}

impl Default for TreasureHuntConfig {
    fn default() -> Self {
        Self {
            probabilities: vec![0.4, 0.5, 0.6, 0.7],
            grid_side: 10,
            max_treasures_per_quadrant: 100,
            rounds: 3_000,
            seed: 0,
        }
    }
}

/// Outcome of a single round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HuntRound {
    pub round: usize,
    pub quadrant: usize,
    pub row: usize,
    pub col: usize,
    pub reward: Reward,
    pub regret: f64,
    pub cumulative_regret: f64,
}

/// Result of a finished hunt.
#[derive(Clone, Debug, PartialEq)]
pub struct HuntSummary {
    pub rounds: usize,
    pub treasures_found: usize,
    pub cumulative_regret: f64,
    /// Times each quadrant was chosen
    pub pulls: Vec<usize>,
}

/// Simulation context holding all round-scoped treasure hunt state.
pub struct TreasureHunt<P> {
    config: TreasureHuntConfig,
    /// Treasure flags per quadrant, row-major
    board: Vec<Vec<bool>>,
    bandit: Bandit<P>,
    tracker: RegretTracker<RewardTable>,
    rng: StdRng,
    round: usize,
    treasures_found: usize,
    pulls: Vec<usize>,
}

impl<P: Policy> TreasureHunt<P> {
    /// Creates a hunt; the policy must have one arm per quadrant.
    pub fn new(config: TreasureHuntConfig, policy: P) -> Result<Self> {
        let tracker = RegretTracker::new(config.probabilities.clone())?;
        let quadrants = config.probabilities.len();
        if policy.n_arms() != quadrants {
            return Err(BanditError::invalid_configuration(format!(
                "treasure hunt has {quadrants} quadrants but the policy has {} arms",
                policy.n_arms()
            )));
        }
        if config.grid_side == 0 {
            return Err(BanditError::invalid_configuration(
                "grid side must be positive",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let boxes = config.grid_side * config.grid_side;
        let board = config
            .probabilities
            .iter()
            .map(|p| {
                let expected = (config.max_treasures_per_quadrant as f64 * p).round() as usize;
                let mut quadrant = vec![false; boxes];
                for cell in rand::seq::index::sample(&mut rng, boxes, expected.min(boxes)) {
                    quadrant[cell] = true;
                }
                quadrant
            })
            .collect();
        let bandit = Bandit::new(policy, rng.random());

        Ok(Self {
            board,
            bandit,
            tracker,
            rng,
            round: 0,
            treasures_found: 0,
            pulls: vec![0; quadrants],
            config,
        })
    }

    /// Number of treasures hidden in `quadrant`
    pub fn treasure_count(&self, quadrant: usize) -> Option<usize> {
        self.board
            .get(quadrant)
            .map(|cells| cells.iter().filter(|&&t| t).count())
    }

    /// Whether a treasure is hidden at the given box
    pub fn has_treasure(&self, quadrant: usize, row: usize, col: usize) -> bool {
        let side = self.config.grid_side;
        row < side && col < side && self.board.get(quadrant).is_some_and(|cells| cells[row * side + col])
    }

    /// Gets the bandit choosing quadrants
    pub fn bandit(&self) -> &Bandit<P> {
        &self.bandit
    }

    /// Gets the regret tracker
    pub fn tracker(&self) -> &RegretTracker<RewardTable> {
        &self.tracker
    }

    /// Gets the number of rounds played
    pub fn round(&self) -> usize {
        self.round
    }

    /// Plays one round.
    pub fn play_round(&mut self) -> Result<HuntRound> {
        let quadrant = self.bandit.select();
        let side = self.config.grid_side;
        let row = self.rng.random_range(0..side);
        let col = self.rng.random_range(0..side);
        let reward = Reward::from(self.has_treasure(quadrant, row, col));

        self.bandit.update(quadrant, reward)?;
        let regret = self.tracker.record_round(quadrant)?;

        self.round += 1;
        self.pulls[quadrant] += 1;
        if reward.is_success() {
            self.treasures_found += 1;
        }

        debug!(
            round = self.round,
            quadrant,
            row,
            col,
            found = reward.is_success(),
            regret,
            "treasure hunt round"
        );

        Ok(HuntRound {
            round: self.round,
            quadrant,
            row,
            col,
            reward,
            regret,
            cumulative_regret: self.tracker.cumulative_regret(),
        })
    }

    /// Plays the configured number of rounds.
    pub fn run(&mut self) -> Result<HuntSummary> {
        for _ in 0..self.config.rounds {
            self.play_round()?;
        }

        info!(
            rounds = self.round,
            treasures_found = self.treasures_found,
            cumulative_regret = self.tracker.cumulative_regret(),
            "treasure hunt finished"
        );

        Ok(HuntSummary {
            rounds: self.round,
            treasures_found: self.treasures_found,
            cumulative_regret: self.tracker.cumulative_regret(),
            pulls: self.pulls.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{AdaptivePlay, Ucb};

    #[test]
    fn test_board_treasure_counts() {
        let hunt = TreasureHunt::new(TreasureHuntConfig::default(), Ucb::new(4).unwrap()).unwrap();
        assert_eq!(hunt.treasure_count(0), Some(40));
        assert_eq!(hunt.treasure_count(1), Some(50));
        assert_eq!(hunt.treasure_count(2), Some(60));
        assert_eq!(hunt.treasure_count(3), Some(70));
        assert_eq!(hunt.treasure_count(4), None);
        assert!(!hunt.has_treasure(0, 10, 0));
    }

    #[test]
    fn test_treasures_capped_at_quadrant_size() {
        let config = TreasureHuntConfig {
            probabilities: vec![1.0, 0.0],
            grid_side: 5,
            ..TreasureHuntConfig::default()
        };
        let hunt = TreasureHunt::new(config, Ucb::new(2).unwrap()).unwrap();
        assert_eq!(hunt.treasure_count(0), Some(25));
        assert_eq!(hunt.treasure_count(1), Some(0));
    }

    #[test]
    fn test_hunt_validation() {
        let config = TreasureHuntConfig::default();
        assert!(TreasureHunt::new(config.clone(), Ucb::new(3).unwrap()).is_err());

        let bad = TreasureHuntConfig {
            probabilities: vec![0.5, 1.5],
            ..config.clone()
        };
        assert!(TreasureHunt::new(bad, Ucb::new(2).unwrap()).is_err());

        let empty_grid = TreasureHuntConfig {
            grid_side: 0,
            ..config
        };
        assert!(TreasureHunt::new(empty_grid, Ucb::new(4).unwrap()).is_err());
    }

    #[test]
    fn test_hunt_round_reward_matches_board() {
        let mut hunt = TreasureHunt::new(TreasureHuntConfig::default(), Ucb::new(4).unwrap()).unwrap();
        for expected_quadrant in 0..4 {
            let round = hunt.play_round().unwrap();
            assert_eq!(round.quadrant, expected_quadrant);
            assert_eq!(
                round.reward.is_success(),
                hunt.has_treasure(round.quadrant, round.row, round.col)
            );
        }
        assert_eq!(hunt.tracker().rounds(), 4);
    }

    #[test]
    fn test_hunt_run_summary() {
        let config = TreasureHuntConfig {
            rounds: 500,
            seed: 9,
            ..TreasureHuntConfig::default()
        };
        let mut hunt = TreasureHunt::new(config, AdaptivePlay::new(4, 0.05).unwrap()).unwrap();
        let summary = hunt.run().unwrap();

        assert_eq!(summary.rounds, 500);
        assert_eq!(summary.pulls.iter().sum::<usize>(), 500);
        assert!(summary.treasures_found <= 500);
        assert_eq!(hunt.tracker().history().len(), 500);

        let expected: f64 = summary
            .pulls
            .iter()
            .zip([0.3, 0.2, 0.1, 0.0])
            .map(|(&n, gap)| n as f64 * gap)
            .sum();
        assert!((summary.cumulative_regret - expected).abs() < 1e-6);
    }
}
