//! Error types for the arcade-bandit library.

use thiserror::Error;

/// Result type alias for bandit operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Errors that can occur during bandit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// The configuration supplied at construction is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// An arm index outside `0..n_arms` was supplied.
    #[error("arm {arm} out of range for {n_arms} arms")]
    ArmOutOfRange { arm: usize, n_arms: usize },

    /// Arithmetic produced a non-finite or out-of-range value.
    #[error("numeric degeneracy: {message}")]
    NumericDegeneracy { message: String },

    /// Builder configuration error.
    #[error("builder error: {message}")]
    BuilderError { message: String },
}

impl BanditError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        BanditError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Returns an `ArmOutOfRange` error unless `arm < n_arms`.
    pub(crate) fn check_arm(arm: usize, n_arms: usize) -> Result<()> {
        if arm < n_arms {
            Ok(())
        } else {
            Err(BanditError::ArmOutOfRange { arm, n_arms })
        }
    }
}

/// Validates a table of per-arm probabilities.
pub(crate) fn check_probabilities(probabilities: &[f64]) -> Result<()> {
    if probabilities.is_empty() {
        return Err(BanditError::invalid_configuration(
            "probability table must not be empty",
        ));
    }
    if let Some((arm, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(BanditError::invalid_configuration(format!(
            "probability {p} for arm {arm} is outside [0, 1]"
        )));
    }
    Ok(())
}
