use stakeboard_core::Amount;
use thiserror::Error;

use crate::controller::{RejectReason, Shortfall};

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Stakeboard core error: {0}")]
    Core(#[from] stakeboard_core::StakeboardError),

    #[error("Please make your first move on the board")]
    NoMoveSelected,

    #[error("Stake must be greater than zero")]
    ZeroStake,

    #[error("Insufficient balance: need {need} {shortfall}, have {available}")]
    InsufficientBalance {
        shortfall: Shortfall,
        need: Amount,
        available: Amount,
    },

    #[error("Invalid cell index: {0} (expected 0-8)")]
    InvalidCell(usize),

    #[error("Invalid form state: {0}")]
    InvalidState(String),

    #[error("Chain submission failed: {0}")]
    Chain(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn chain(msg: impl Into<String>) -> Self {
        Self::Chain(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

impl From<RejectReason> for GameError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::ZeroStake => GameError::ZeroStake,
            RejectReason::NoMoveSelected => GameError::NoMoveSelected,
            RejectReason::InsufficientBalance {
                shortfall,
                need,
                available,
            } => GameError::InsufficientBalance {
                shortfall,
                need,
                available,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_failure_is_serialization_error() {
        let err: GameError = serde_json::from_str::<u8>("not a number")
            .unwrap_err()
            .into();
        assert!(matches!(err, GameError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
