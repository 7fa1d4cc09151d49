//! Arcade Bandit: multi-armed bandits for game-playing agents.
//!
//! This library provides an adaptive play (APS) bandit and a UCB1 bandit
//! behind one [`Policy`](policies::Policy) contract, a regret tracker that
//! measures either probability regret or battle-payoff regret, and headless
//! treasure hunt and battle simulations that drive them round by round.
//!
//! # Quick Start
//!
//! ```
//! use arcade_bandit::prelude::*;
//!
//! // Build a bandit from configuration
//! let mut bandit = Bandit::builder()
//!     .arms(4)
//!     .policy(LearningPolicy::AdaptivePlay { eta: 0.08 })
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! // Track regret against known reward probabilities
//! let mut tracker = RegretTracker::new(vec![0.4, 0.5, 0.6, 0.7]).unwrap();
//!
//! let arm = bandit.select();
//! bandit.update(arm, true).unwrap();
//! tracker.record_round(arm).unwrap();
//! assert_eq!(tracker.history().len(), 1);
//! ```

mod bandit;
pub mod battle;
pub mod environment;
mod error;
pub mod policies;
mod policy;
pub mod regret;
mod reward;
pub mod treasure;

// Re-export main types
pub use bandit::{Bandit, BanditBuilder, LearningPolicy};
pub use error::{BanditError, Result};
pub use reward::Reward;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use arcade_bandit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::battle::{Action, Battle, BattleConfig, Fighter};
    pub use crate::environment::BernoulliArms;
    pub use crate::policies::{AdaptivePlay, Policy, Ucb};
    pub use crate::regret::{PayoffTable, RegretTracker, RewardTable};
    pub use crate::treasure::{TreasureHunt, TreasureHuntConfig};
    pub use crate::{Bandit, BanditError, LearningPolicy, Result, Reward};
}
