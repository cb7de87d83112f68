use thiserror::Error;

use crate::core::types::PlayerId;
use crate::game::state::Phase;

#[derive(Error, Debug)]
pub enum TraitorsError {
    #[error("Invalid player count {requested}: must be between {min} and {max}")]
    InvalidPlayerCount { requested: i64, min: usize, max: usize },

    #[error("Invalid choice {target}: {reason}")]
    InvalidChoice { target: PlayerId, reason: String },

    #[error("No valid targets")]
    NoValidTargets,

    #[error("No votes were cast")]
    EmptyVotePool,

    #[error("Cannot {action} during the {phase} phase")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Game session closed")]
    SessionClosed,
}

impl TraitorsError {
    /// In-game conditions the state machine recovers from on its own
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TraitorsError::InvalidPlayerCount { .. }
                | TraitorsError::InvalidChoice { .. }
                | TraitorsError::NoValidTargets
                | TraitorsError::EmptyVotePool
        )
    }
}

pub type Result<T> = std::result::Result<T, TraitorsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_taxonomy() {
        assert!(TraitorsError::NoValidTargets.is_recoverable());
        assert!(TraitorsError::EmptyVotePool.is_recoverable());
        assert!(TraitorsError::InvalidChoice {
            target: PlayerId(3),
            reason: "eliminated".into(),
        }
        .is_recoverable());
        assert!(!TraitorsError::SessionClosed.is_recoverable());
        assert!(!TraitorsError::InvalidTransition {
            action: "start vote",
            phase: Phase::Night,
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = TraitorsError::InvalidTransition {
            action: "start vote",
            phase: Phase::Lobby,
        };
        assert_eq!(err.to_string(), "Cannot start vote during the lobby phase");
    }
}
