//! Batch validation of a planned turn.
//!
//! [`validate`] checks a list of proposed actions against a [`TurnState`]
//! without touching it and reports every problem at once. [`commit`]
//! applies a plan that passes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::turn::{TurnState, check_movement};

/// The turn slot a proposed action occupies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The action.
    Action,
    /// The bonus action.
    Bonus,
    /// The reaction.
    Reaction,
    /// Feet of movement.
    Movement(u32),
    /// One use of a named class resource.
    Resource(String),
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Bonus => write!(f, "bonus"),
            Self::Reaction => write!(f, "reaction"),
            Self::Movement(n) => write!(f, "movement:{n}"),
            Self::Resource(name) => write!(f, "{name}"),
        }
    }
}

/// One entry of a turn plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Slot the entry spends.
    pub slot: Slot,
    /// Class resource the entry also spends, if any.
    #[serde(default)]
    pub resource: Option<String>,
    /// Free-form description carried into the turn history.
    #[serde(default)]
    pub details: String,
}

impl ProposedAction {
    /// An entry spending only a slot.
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            resource: None,
            details: String::new(),
        }
    }

    /// Also spend a named class resource.
    pub fn with_resource(mut self, name: impl Into<String>) -> Self {
        self.resource = Some(name.into());
        self
    }

    /// Attach a description.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

impl From<Slot> for ProposedAction {
    fn from(slot: Slot) -> Self {
        Self::new(slot)
    }
}

/// A problem with one entry of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Position of the offending entry in the plan.
    pub index: usize,
    /// A human-readable description of the issue.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry {}: {}", self.index, self.message)
    }
}

/// Outcome of validating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResult {
    /// Every entry can be applied in order.
    Valid {
        /// The plan, in application order.
        plan: Vec<ProposedAction>,
    },
    /// At least one entry cannot be applied.
    Invalid {
        /// Every problem found.
        issues: Vec<ValidationIssue>,
    },
}

impl ValidationResult {
    /// Whether the plan passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Issue messages; empty for a valid plan.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Valid { .. } => Vec::new(),
            Self::Invalid { issues } => issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Check a plan against the current turn without mutating it.
///
/// Each slot value, including each `movement:<n>`, may appear at most
/// once. Movement is checked against a running total so a plan can move
/// in several steps of different lengths.
pub fn validate(state: &TurnState, plan: &[ProposedAction]) -> ValidationResult {
    let mut issues = Vec::new();
    let mut seen: BTreeSet<Slot> = BTreeSet::new();
    let mut movement_left = state.movement_left();

    for (index, entry) in plan.iter().enumerate() {
        let mut claimed = vec![entry.slot.clone()];
        if let Some(name) = &entry.resource {
            claimed.push(Slot::Resource(name.clone()));
        }
        for slot in claimed {
            if !seen.insert(slot.clone()) {
                issues.push(ValidationIssue {
                    index,
                    message: format!("{slot} used more than once in this plan"),
                });
            }
        }

        let slot_check = match &entry.slot {
            Slot::Action => state.check_action(),
            Slot::Bonus => state.check_bonus(),
            Slot::Reaction => state.check_reaction(),
            Slot::Movement(distance) => {
                let checked = check_movement(*distance, movement_left);
                if checked.is_ok() {
                    movement_left -= distance;
                }
                checked
            }
            Slot::Resource(name) => check_resource(state, name),
        };
        if let Err(e) = slot_check {
            issues.push(ValidationIssue {
                index,
                message: e.to_string(),
            });
        }

        let attached = entry.resource.as_deref().map(|name| check_resource(state, name));
        if let Some(Err(e)) = attached {
            issues.push(ValidationIssue {
                index,
                message: e.to_string(),
            });
        }
    }

    if issues.is_empty() {
        ValidationResult::Valid {
            plan: plan.to_vec(),
        }
    } else {
        tracing::debug!(issues = issues.len(), "turn plan rejected");
        ValidationResult::Invalid { issues }
    }
}

/// Validate a plan, then apply it to a copy of the turn.
///
/// The input state is never modified. A rejected plan returns
/// [`RulesError::ValidationConflict`] carrying every issue message.
pub fn commit(state: &TurnState, plan: &[ProposedAction]) -> RulesResult<TurnState> {
    let result = validate(state, plan);
    if !result.is_valid() {
        return Err(RulesError::ValidationConflict(result.messages()));
    }

    let mut next = state.clone();
    for entry in plan {
        let details = entry.details.as_str();
        match &entry.slot {
            Slot::Action => next.use_action(details)?,
            Slot::Bonus => next.use_bonus(details)?,
            Slot::Reaction => next.use_reaction(details)?,
            Slot::Movement(distance) => next.use_movement(*distance, details)?,
            Slot::Resource(name) => {
                next.use_class_resource(name, details)?;
            }
        }
        if let Some(name) = &entry.resource {
            next.use_class_resource(name, details)?;
        }
    }
    tracing::debug!(entries = plan.len(), "turn plan committed");
    Ok(next)
}

fn check_resource(state: &TurnState, name: &str) -> RulesResult<()> {
    if state.resources().get(name)?.is_exhausted() {
        return Err(RulesError::ResourceExhausted(name.to_string()));
    }
    Ok(())
}
