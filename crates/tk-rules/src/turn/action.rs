//! Turn history records and conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A condition that restricts what a creature can do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Cannot see.
    Blinded,
    /// Cannot attack the charmer.
    Charmed,
    /// Cannot hear.
    Deafened,
    /// Disadvantage while the source is in sight.
    Frightened,
    /// Speed becomes 0.
    Grappled,
    /// No actions or reactions.
    Incapacitated,
    /// Cannot be seen.
    Invisible,
    /// Incapacitated and cannot move.
    Paralyzed,
    /// Turned to stone.
    Petrified,
    /// Disadvantage on attacks and checks.
    Poisoned,
    /// Lying on the ground.
    Prone,
    /// Speed becomes 0, attacks have disadvantage.
    Restrained,
    /// Incapacitated and dazed.
    Stunned,
    /// Incapacitated and unaware.
    Unconscious,
}

impl Condition {
    /// Whether the condition blocks actions, bonus actions, and reactions.
    pub fn is_incapacitating(self) -> bool {
        matches!(
            self,
            Self::Incapacitated
                | Self::Paralyzed
                | Self::Petrified
                | Self::Stunned
                | Self::Unconscious
        )
    }

    /// Whether the condition drops speed to zero.
    pub fn zeroes_speed(self) -> bool {
        matches!(self, Self::Grappled | Self::Restrained) || self.is_incapacitating()
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blinded => "blinded",
            Self::Charmed => "charmed",
            Self::Deafened => "deafened",
            Self::Frightened => "frightened",
            Self::Grappled => "grappled",
            Self::Incapacitated => "incapacitated",
            Self::Invisible => "invisible",
            Self::Paralyzed => "paralyzed",
            Self::Petrified => "petrified",
            Self::Poisoned => "poisoned",
            Self::Prone => "prone",
            Self::Restrained => "restrained",
            Self::Stunned => "stunned",
            Self::Unconscious => "unconscious",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a history entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// The action slot was spent.
    Action,
    /// The bonus action slot was spent.
    Bonus,
    /// The reaction was spent.
    Reaction,
    /// Feet of movement were spent.
    Movement {
        /// Distance moved.
        distance: u32,
    },
    /// A class resource use was spent.
    Resource {
        /// Pool name.
        name: String,
    },
    /// The action was spent to gain extra movement.
    Dash {
        /// Movement gained.
        gained: u32,
    },
    /// A condition was applied.
    ConditionAdded(Condition),
    /// A condition ended.
    ConditionRemoved(Condition),
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Bonus => write!(f, "bonus action"),
            Self::Reaction => write!(f, "reaction"),
            Self::Movement { distance } => write!(f, "move {distance} ft"),
            Self::Resource { name } => write!(f, "use {name}"),
            Self::Dash { gained } => write!(f, "dash (+{gained} ft)"),
            Self::ConditionAdded(c) => write!(f, "gain {c}"),
            Self::ConditionRemoved(c) => write!(f, "lose {c}"),
        }
    }
}

/// One entry in a turn's append-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position within the turn, starting at 0.
    pub sequence: usize,
    /// Wall-clock time the transition was applied.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: ActionKind,
    /// Free-form caller description, may be empty.
    pub details: String,
}

impl ActionRecord {
    /// Create a record stamped with the current time.
    pub fn new(sequence: usize, kind: ActionKind, details: impl Into<String>) -> Self {
        Self {
            sequence,
            timestamp: Utc::now(),
            kind,
            details: details.into(),
        }
    }
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.sequence, self.kind)?;
        if !self.details.is_empty() {
            write!(f, ": {}", self.details)?;
        }
        Ok(())
    }
}
