//! Bandit policies over a fixed set of indexed arms

mod adaptive;
mod ucb;

pub use adaptive::{AdaptivePlay, MIN_COMPLEMENT, MIN_WEIGHT, WEIGHT_CEILING};
pub use ucb::Ucb;

pub use crate::policy::Policy;
