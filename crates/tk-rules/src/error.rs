//! Error types for the rules engine.

use crate::turn::Condition;

/// Errors that can occur during rules operations.
///
/// Every variant is a local, recoverable condition. An operation that
/// returns one of these leaves the state it was called on untouched.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// A level outside the supported range was requested.
    #[error("invalid level: {0}")]
    InvalidLevel(u32),

    /// A race, class, or background was not found in the reference data.
    #[error("unknown {kind}: {name}")]
    UnknownReferenceData {
        /// Which table was searched ("race", "class", "background").
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// The action slot has already been spent this turn.
    #[error("action already used this turn")]
    ActionAlreadyUsed,

    /// The bonus action slot has already been spent this turn.
    #[error("bonus action already used this turn")]
    BonusAlreadyUsed,

    /// The reaction is not available.
    #[error("reaction unavailable")]
    ReactionUnavailable,

    /// Not enough movement left for the requested distance.
    #[error("insufficient movement: requested {requested}, {remaining} left")]
    InsufficientMovement {
        /// Distance requested.
        requested: u32,
        /// Movement left in the turn.
        remaining: u32,
    },

    /// A resource pool has no uses left.
    #[error("resource '{0}' exhausted")]
    ResourceExhausted(String),

    /// A resource pool does not exist in the registry.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// A batch of proposed actions conflicts with itself or the turn state.
    #[error("validation conflict: {}", .0.join("; "))]
    ValidationConflict(Vec<String>),

    /// The character cannot act because of a condition.
    #[error("cannot act while {0}")]
    Incapacitated(Condition),

    /// A guided selection was not legal for the reference entry.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The rules configuration is malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reference data or configuration JSON could not be parsed.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
