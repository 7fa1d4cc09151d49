//! Binary reward feedback.
//!
//! Rewards are success/failure. Numeric feedback is coerced permissively:
//! exactly one counts as a success and every other value as a failure, so a
//! host can pass game scores straight through.

/// A binary reward observed after pulling an arm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reward(bool);

impl Reward {
    /// A successful pull.
    pub const SUCCESS: Reward = Reward(true);
    /// A failed pull.
    pub const FAILURE: Reward = Reward(false);

    /// Whether the pull succeeded.
    pub fn is_success(self) -> bool {
        self.0
    }

    /// The reward as `1.0` or `0.0`.
    pub fn value(self) -> f64 {
        if self.0 { 1.0 } else { 0.0 }
    }
}

impl From<bool> for Reward {
    fn from(value: bool) -> Self {
        Reward(value)
    }
}

impl From<u8> for Reward {
    fn from(value: u8) -> Self {
        Reward(value == 1)
    }
}

impl From<i32> for Reward {
    fn from(value: i32) -> Self {
        Reward(value == 1)
    }
}

impl From<i64> for Reward {
    fn from(value: i64) -> Self {
        Reward(value == 1)
    }
}

impl From<f64> for Reward {
    fn from(value: f64) -> Self {
        Reward(value == 1.0)
    }
}

impl From<Reward> for f64 {
    fn from(reward: Reward) -> Self {
        reward.value()
    }
}
