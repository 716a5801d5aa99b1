//! Limited-use class resources (Rage, Ki, Second Wind, etc.).
//!
//! A pool counts how many uses have been spent since its last recovery.
//! `current_uses` is always clamped between 0 and `max_uses`.

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores};

/// Which rest restores a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Restored by a short or a long rest.
    ShortRest,
    /// Restored only by a long rest.
    LongRest,
    /// Never restored automatically.
    None,
}

/// A rest event that triggers recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// A short rest.
    ShortRest,
    /// A long rest (subsumes a short rest).
    LongRest,
}

impl Recovery {
    /// Returns true if this rest restores pools tagged with `self`.
    pub fn recovers_on(self, rest: RestKind) -> bool {
        match (self, rest) {
            (Self::ShortRest, _) => true,
            (Self::LongRest, RestKind::LongRest) => true,
            (Self::LongRest, RestKind::ShortRest) | (Self::None, _) => false,
        }
    }
}

impl std::fmt::Display for RestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortRest => write!(f, "short rest"),
            Self::LongRest => write!(f, "long rest"),
        }
    }
}

/// How a pool's maximum scales with the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsesFormula {
    /// A fixed number of uses.
    Fixed(u32),
    /// `level × n` uses.
    PerLevel(u32),
    /// Uses equal to an ability modifier (minimum 1).
    AbilityModifier(Ability),
}

impl UsesFormula {
    /// Evaluate the maximum uses for a level and score set.
    pub fn max_uses(self, level: u32, scores: &AbilityScores) -> u32 {
        match self {
            Self::Fixed(n) => n,
            Self::PerLevel(n) => level.saturating_mul(n),
            Self::AbilityModifier(ability) => scores.modifier(ability).max(1) as u32,
        }
    }
}

/// Definition of a class resource as it appears in reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Pool name (e.g., "Rage").
    pub name: String,
    /// How the maximum is computed.
    pub uses: UsesFormula,
    /// Which rest restores the pool.
    pub recovery: Recovery,
}

impl ResourceSpec {
    /// Create a spec.
    pub fn new(name: impl Into<String>, uses: UsesFormula, recovery: Recovery) -> Self {
        Self {
            name: name.into(),
            uses,
            recovery,
        }
    }
}

/// A named limited-use resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Display name of the pool.
    pub name: String,
    /// Maximum number of uses between recoveries.
    pub max_uses: u32,
    /// Uses spent since the last recovery.
    pub current_uses: u32,
    /// Which rest restores the pool.
    pub recovery: Recovery,
    /// How `max_uses` scales on level-up.
    pub uses: UsesFormula,
}

impl ResourcePool {
    /// Create a fresh pool with no uses spent.
    pub fn new(name: impl Into<String>, max_uses: u32, recovery: Recovery) -> Self {
        Self {
            name: name.into(),
            max_uses,
            current_uses: 0,
            recovery,
            uses: UsesFormula::Fixed(max_uses),
        }
    }

    /// Build a fresh pool from a spec.
    pub fn from_spec(spec: &ResourceSpec, level: u32, scores: &AbilityScores) -> Self {
        Self {
            name: spec.name.clone(),
            max_uses: spec.uses.max_uses(level, scores),
            current_uses: 0,
            recovery: spec.recovery,
            uses: spec.uses,
        }
    }

    /// Uses still available.
    pub fn remaining(&self) -> u32 {
        self.max_uses.saturating_sub(self.current_uses)
    }

    /// Returns true if no uses remain.
    pub fn is_exhausted(&self) -> bool {
        self.current_uses >= self.max_uses
    }

    /// Spend one use. Returns false (and changes nothing) if exhausted.
    pub(crate) fn spend(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.current_uses += 1;
        true
    }

    /// Give back `amount` spent uses, clamping at zero.
    pub(crate) fn give_back(&mut self, amount: u32) {
        self.current_uses = self.current_uses.saturating_sub(amount);
    }

    /// Mark every use available again.
    pub(crate) fn reset(&mut self) {
        self.current_uses = 0;
    }

    /// Recompute the maximum, keeping spent uses within it.
    pub(crate) fn rescale(&mut self, level: u32, scores: &AbilityScores) {
        self.max_uses = self.uses.max_uses(level, scores);
        self.current_uses = self.current_uses.min(self.max_uses);
    }
}

impl std::fmt::Display for ResourcePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.remaining(), self.max_uses)
    }
}
