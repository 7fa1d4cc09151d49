//! Headless two-player battle driven by a bandit.
//!
//! Player 1 follows an [`Opponent`] strategy; player 2 is a bandit choosing
//! among the four [`Action`]s. Each round both actions are resolved against
//! the damage table, player 2's score is fed back to its bandit, and the
//! exchange is recorded with a payoff-based [`RegretTracker`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::bandit::Bandit;
use crate::error::{BanditError, Result};
use crate::policies::{AdaptivePlay, Policy};
use crate::regret::{PayoffTable, RegretTracker};
use crate::reward::Reward;

/// A battle action; its index doubles as the bandit arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Attack,
    Defend,
    BuildGold,
    SpecialPower,
}

impl Action {
    /// Every action, in arm order
    pub const ALL: [Action; 4] = [
        Action::Attack,
        Action::Defend,
        Action::BuildGold,
        Action::SpecialPower,
    ];

    /// The arm index of this action
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = BanditError;

    fn try_from(arm: usize) -> Result<Self> {
        Action::ALL
            .get(arm)
            .copied()
            .ok_or(BanditError::ArmOutOfRange {
                arm,
                n_arms: Action::ALL.len(),
            })
    }
}

/// Health and gold of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fighter {
    pub health: i32,
    pub gold: i32,
}

impl Fighter {
    /// A fighter with the given health and no gold
    pub fn new(health: i32) -> Self {
        Self { health, gold: 0 }
    }

    /// Whether this fighter has been knocked out
    pub fn is_down(&self) -> bool {
        self.health <= 0
    }
}

/// Strategy choosing player 1's actions.
pub trait Opponent {
    fn choose(
        &mut self,
        me: Fighter,
        payoffs: &PayoffTable,
        rng: &mut dyn rand::RngCore,
    ) -> Action;
}

/// Uniformly random play that never picks an unaffordable special power.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomOpponent;

impl Opponent for RandomOpponent {
    fn choose(
        &mut self,
        me: Fighter,
        payoffs: &PayoffTable,
        rng: &mut dyn rand::RngCore,
    ) -> Action {
        loop {
            let action = Action::ALL[rng.random_range(0..Action::ALL.len())];
            if action != Action::SpecialPower || me.gold >= payoffs.special_cost {
                return action;
            }
        }
    }
}

/// Replays a fixed sequence of actions, cycling when it runs out.
///
/// Unaffordable special powers are played as-is and fizzle, the way a human
/// player pressing the wrong button would.
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    actions: Vec<Action>,
    cursor: usize,
}

impl ScriptedOpponent {
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(BanditError::invalid_configuration(
                "scripted opponent needs at least one action",
            ));
        }
        Ok(Self { actions, cursor: 0 })
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(
        &mut self,
        _me: Fighter,
        _payoffs: &PayoffTable,
        _rng: &mut dyn rand::RngCore,
    ) -> Action {
        let action = self.actions[self.cursor % self.actions.len()];
        self.cursor += 1;
        action
    }
}

/// Resolves one exchange, mutating both fighters, and returns player 2's score.
pub fn resolve(
    payoffs: &PayoffTable,
    player1_action: Action,
    player2_action: Action,
    player1: &mut Fighter,
    player2: &mut Fighter,
) -> i32 {
    use Action::*;

    let attack = payoffs.attack_damage;
    let special = payoffs.special_damage;
    let blocked = payoffs.defend_reduction;
    let cost = payoffs.special_cost;
    let income = payoffs.gold_income;
    let player2_special = player2.gold >= cost;

    match player1_action {
        Attack => match player2_action {
            Attack => {
                player1.health -= attack;
                player2.health -= attack;
                5
            }
            Defend => {
                player2.health -= attack - blocked;
                20
            }
            BuildGold => {
                player2.health -= attack;
                player2.gold += income;
                10
            }
            SpecialPower if player2_special => {
                player1.health -= special;
                player2.health -= attack;
                player2.gold -= cost;
                25
            }
            SpecialPower => {
                player2.health -= attack;
                5
            }
        },
        Defend => match player2_action {
            Attack => {
                player1.health -= attack - blocked;
                5
            }
            Defend => 5,
            BuildGold => {
                player2.gold += income;
                5
            }
            SpecialPower if player2_special => {
                player1.health -= special - blocked;
                player2.gold -= cost;
                25
            }
            SpecialPower => 5,
        },
        BuildGold => {
            player1.gold += income;
            match player2_action {
                Attack => {
                    player1.health -= attack;
                    15
                }
                Defend => 5,
                BuildGold => {
                    player2.gold += income;
                    10
                }
                SpecialPower if player2_special => {
                    player1.health -= special;
                    player2.gold -= cost;
                    25
                }
                SpecialPower => 5,
            }
        }
        SpecialPower if player1.gold >= cost => {
            player1.gold -= cost;
            match player2_action {
                Attack => {
                    player1.health -= attack;
                    player2.health -= special;
                    5
                }
                Defend => {
                    player2.health -= special - blocked;
                    5
                }
                BuildGold => {
                    player2.gold += income;
                    player2.health -= special;
                    5
                }
                SpecialPower if player2_special => {
                    player1.health -= special;
                    player2.health -= special;
                    player2.gold -= cost;
                    25
                }
                SpecialPower => {
                    player2.health -= special;
                    5
                }
            }
        }
        // An unaffordable special power wastes the whole exchange
        SpecialPower => 0,
    }
}

/// Settings for a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleConfig {
    /// Health both fighters start with
    pub starting_health: i32,
    /// Round budget; the battle also ends when a fighter goes down
    pub max_rounds: usize,
    /// Damage and cost constants
    pub payoffs: PayoffTable,
    /// Seed for the bandit and the opponent
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_health: 500,
            max_rounds: 5_000,
            payoffs: PayoffTable::default(),
            seed: 0,
        }
    }
}

/// Outcome of a single round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattleRound {
    pub round: usize,
    pub player1_action: Action,
    pub player2_action: Action,
    /// Player 2's score for the exchange, fed to its bandit as the reward
    pub score: i32,
    pub regret: f64,
    pub cumulative_regret: f64,
    pub player1: Fighter,
    pub player2: Fighter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player1,
    Player2,
    Draw,
}

/// Result of a finished battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleSummary {
    pub rounds: usize,
    /// `None` when the round budget ran out with both fighters standing
    pub winner: Option<Winner>,
    pub player1: Fighter,
    pub player2: Fighter,
    pub cumulative_regret: f64,
}

/// Simulation context holding all round-scoped battle state.
pub struct Battle<P = AdaptivePlay, O = RandomOpponent> {
    config: BattleConfig,
    player1: Fighter,
    player2: Fighter,
    bandit: Bandit<P>,
    opponent: O,
    tracker: RegretTracker<PayoffTable>,
    rng: StdRng,
    round: usize,
}

impl Battle {
    /// A battle between a random player 1 and an adaptive play bandit
    pub fn adaptive(config: BattleConfig, eta: f64) -> Result<Self> {
        let policy = AdaptivePlay::new(Action::ALL.len(), eta)?;
        Battle::new(config, policy, RandomOpponent)
    }
}

impl<P: Policy, O: Opponent> Battle<P, O> {
    /// Creates a battle; the policy must have one arm per [`Action`].
    pub fn new(config: BattleConfig, policy: P, opponent: O) -> Result<Self> {
        if policy.n_arms() != Action::ALL.len() {
            return Err(BanditError::invalid_configuration(format!(
                "battle policy needs {} arms, got {}",
                Action::ALL.len(),
                policy.n_arms()
            )));
        }
        if config.starting_health <= 0 {
            return Err(BanditError::invalid_configuration(
                "starting health must be positive",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let bandit = Bandit::new(policy, rng.random());
        Ok(Self {
            player1: Fighter::new(config.starting_health),
            player2: Fighter::new(config.starting_health),
            tracker: RegretTracker::battle(config.payoffs),
            config,
            bandit,
            opponent,
            rng,
            round: 0,
        })
    }

    /// Gets player 1's current state
    pub fn player1(&self) -> Fighter {
        self.player1
    }

    /// Gets player 2's current state
    pub fn player2(&self) -> Fighter {
        self.player2
    }

    /// Gets player 2's bandit
    pub fn bandit(&self) -> &Bandit<P> {
        &self.bandit
    }

    /// Gets player 2's regret tracker
    pub fn tracker(&self) -> &RegretTracker<PayoffTable> {
        &self.tracker
    }

    /// Gets the number of rounds played
    pub fn round(&self) -> usize {
        self.round
    }

    /// Whether a fighter is down or the round budget is spent
    pub fn is_over(&self) -> bool {
        self.player1.is_down() || self.player2.is_down() || self.round >= self.config.max_rounds
    }

    /// Plays one round, or returns `None` once the battle is over.
    pub fn play_round(&mut self) -> Result<Option<BattleRound>> {
        if self.is_over() {
            return Ok(None);
        }

        let payoffs = self.config.payoffs;
        let player1_action = self
            .opponent
            .choose(self.player1, &payoffs, &mut self.rng);
        let arm = self.bandit.select();
        let player2_action = Action::try_from(arm)?;

        let score = resolve(
            &payoffs,
            player1_action,
            player2_action,
            &mut self.player1,
            &mut self.player2,
        );
        let regret =
            self.tracker
                .record_exchange(player1_action, player2_action, self.player1, self.player2);
        self.bandit.update(arm, Reward::from(score))?;
        self.round += 1;

        debug!(
            round = self.round,
            ?player1_action,
            ?player2_action,
            score,
            regret,
            player1_health = self.player1.health,
            player2_health = self.player2.health,
            "battle round"
        );

        Ok(Some(BattleRound {
            round: self.round,
            player1_action,
            player2_action,
            score,
            regret,
            cumulative_regret: self.tracker.cumulative_regret(),
            player1: self.player1,
            player2: self.player2,
        }))
    }

    /// Plays until a fighter goes down or the round budget is spent.
    pub fn run(&mut self) -> Result<BattleSummary> {
        while self.play_round()?.is_some() {}

        let winner = match (self.player1.is_down(), self.player2.is_down()) {
            (true, true) => Some(Winner::Draw),
            (true, false) => Some(Winner::Player2),
            (false, true) => Some(Winner::Player1),
            (false, false) => None,
        };
        info!(
            rounds = self.round,
            ?winner,
            cumulative_regret = self.tracker.cumulative_regret(),
            "battle finished"
        );

        Ok(BattleSummary {
            rounds: self.round,
            winner,
            player1: self.player1,
            player2: self.player2,
            cumulative_regret: self.tracker.cumulative_regret(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::Ucb;

    fn exchange(player1_action: Action, player2_action: Action, gold: (i32, i32)) -> (i32, Fighter, Fighter) {
        let mut player1 = Fighter { health: 100, gold: gold.0 };
        let mut player2 = Fighter { health: 100, gold: gold.1 };
        let score = resolve(
            &PayoffTable::default(),
            player1_action,
            player2_action,
            &mut player1,
            &mut player2,
        );
        (score, player1, player2)
    }

    #[test]
    fn test_action_arms() {
        for (arm, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), arm);
            assert_eq!(Action::try_from(arm).unwrap(), *action);
        }
        assert!(Action::try_from(4).is_err());
    }

    #[test]
    fn test_resolve_attack_exchanges() {
        let (score, p1, p2) = exchange(Action::Attack, Action::Attack, (0, 0));
        assert_eq!((score, p1.health, p2.health), (5, 90, 90));

        let (score, p1, p2) = exchange(Action::Attack, Action::Defend, (0, 0));
        assert_eq!((score, p1.health, p2.health), (20, 100, 95));

        let (score, _, p2) = exchange(Action::Attack, Action::BuildGold, (0, 0));
        assert_eq!((score, p2.health, p2.gold), (10, 90, 10));

        let (score, p1, p2) = exchange(Action::Attack, Action::SpecialPower, (0, 60));
        assert_eq!((score, p1.health, p2.health, p2.gold), (25, 80, 90, 10));

        let (score, p1, p2) = exchange(Action::Attack, Action::SpecialPower, (0, 40));
        assert_eq!((score, p1.health, p2.health, p2.gold), (5, 100, 90, 40));
    }

    #[test]
    fn test_resolve_defend_and_build() {
        let (score, p1, _) = exchange(Action::Defend, Action::Attack, (0, 0));
        assert_eq!((score, p1.health), (5, 95));

        let (score, p1, p2) = exchange(Action::Defend, Action::SpecialPower, (0, 50));
        assert_eq!((score, p1.health, p2.gold), (25, 85, 0));

        let (score, p1, _) = exchange(Action::BuildGold, Action::Attack, (0, 0));
        assert_eq!((score, p1.health, p1.gold), (15, 90, 10));

        let (score, p1, p2) = exchange(Action::BuildGold, Action::BuildGold, (0, 0));
        assert_eq!((score, p1.gold, p2.gold), (10, 10, 10));
    }

    #[test]
    fn test_resolve_special_power() {
        let (score, p1, p2) = exchange(Action::SpecialPower, Action::Attack, (50, 0));
        assert_eq!((score, p1.health, p1.gold, p2.health), (5, 90, 0, 80));

        let (score, _, p2) = exchange(Action::SpecialPower, Action::Defend, (50, 0));
        assert_eq!((score, p2.health), (5, 85));

        let (score, p1, p2) = exchange(Action::SpecialPower, Action::SpecialPower, (70, 50));
        assert_eq!((score, p1.health, p1.gold, p2.health, p2.gold), (25, 80, 20, 80, 0));

        // Without gold nothing happens at all
        let (score, p1, p2) = exchange(Action::SpecialPower, Action::Attack, (10, 0));
        assert_eq!((score, p1, p2), (0, Fighter { health: 100, gold: 10 }, Fighter::new(100)));
    }

    #[test]
    fn test_random_opponent_respects_gold() {
        let mut opponent = RandomOpponent;
        let mut rng = StdRng::seed_from_u64(4);
        let payoffs = PayoffTable::default();
        for _ in 0..500 {
            let action = opponent.choose(Fighter::new(100), &payoffs, &mut rng);
            assert_ne!(action, Action::SpecialPower);
        }
    }

    #[test]
    fn test_scripted_opponent_cycles() {
        assert!(ScriptedOpponent::new(vec![]).is_err());

        let mut opponent = ScriptedOpponent::new(vec![Action::Attack, Action::Defend]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let payoffs = PayoffTable::default();
        let picks: Vec<Action> = (0..3)
            .map(|_| opponent.choose(Fighter::new(1), &payoffs, &mut rng))
            .collect();
        assert_eq!(picks, vec![Action::Attack, Action::Defend, Action::Attack]);
    }

    #[test]
    fn test_battle_rejects_wrong_arm_count() {
        let policy = AdaptivePlay::new(3, 0.08).unwrap();
        assert!(Battle::new(BattleConfig::default(), policy, RandomOpponent).is_err());
    }

    #[test]
    fn test_battle_round_bookkeeping() {
        let opponent = ScriptedOpponent::new(vec![Action::Attack]).unwrap();
        let mut battle = Battle::new(BattleConfig::default(), Ucb::new(4).unwrap(), opponent).unwrap();

        // UCB explores arms in order, so player 2 plays Attack first
        let round = battle.play_round().unwrap().unwrap();
        assert_eq!(round.round, 1);
        assert_eq!(round.player2_action, Action::Attack);
        assert_eq!(round.score, 5);
        assert_eq!(round.player1.health, 490);
        assert_eq!(round.player2.health, 490);
        assert_eq!(round.regret, 0.0);

        // Then Defend: the realized payoff is 490 against a worst case of 480
        let round = battle.play_round().unwrap().unwrap();
        assert_eq!(round.player2_action, Action::Defend);
        assert_eq!(round.regret, 10.0);
        assert_eq!(battle.tracker().history(), &[0.0, 10.0]);
        assert_eq!(battle.bandit().policy().total_pulls(), 2);
    }

    #[test]
    fn test_battle_runs_to_completion() {
        let config = BattleConfig {
            seed: 21,
            ..BattleConfig::default()
        };
        let mut battle = Battle::adaptive(config, 0.08).unwrap();
        let summary = battle.run().unwrap();

        assert!(summary.rounds > 0);
        assert!(summary.winner.is_some() || summary.rounds == 5_000);
        assert_eq!(battle.tracker().rounds(), summary.rounds);
        assert!(battle.play_round().unwrap().is_none());
        assert!(summary.cumulative_regret >= 0.0);
    }

    #[test]
    fn test_battle_round_budget() {
        let config = BattleConfig {
            max_rounds: 3,
            ..BattleConfig::default()
        };
        let opponent = ScriptedOpponent::new(vec![Action::Defend]).unwrap();
        let mut battle = Battle::new(config, AdaptivePlay::new(4, 0.05).unwrap(), opponent).unwrap();
        let summary = battle.run().unwrap();
        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.winner, None);
    }
}
