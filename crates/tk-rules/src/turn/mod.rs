//! Per-turn action economy.
//!
//! A [`TurnState`] is created at the start of a creature's turn and spent
//! through a small set of transitions. Each transition either applies in
//! full and appends an [`ActionRecord`], or fails and leaves the state as
//! it was. The turn is "closed" once every slot is spent; that is an
//! observation, not a state the machine enters.

pub mod action;

pub use action::{ActionKind, ActionRecord, Condition};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::resources::{ResourcePool, ResourceRegistry};
use crate::sheet::CharacterRecord;

/// Mutable state for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    action_used: bool,
    bonus_used: bool,
    reaction_available: bool,
    movement_left: u32,
    speed: u32,
    resources: ResourceRegistry,
    conditions: BTreeSet<Condition>,
    history: Vec<ActionRecord>,
}

impl TurnState {
    /// A fresh turn seeded from the character's speed and live resources.
    pub fn reset(character: &CharacterRecord) -> Self {
        reset_turn(character, character.resources().snapshot())
    }

    /// Carry conditions over from a previous turn.
    ///
    /// Speed-zeroing conditions take effect immediately.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        if self.speed_zeroed() {
            self.movement_left = 0;
        }
        self
    }

    /// Whether the action has been spent.
    pub fn action_used(&self) -> bool {
        self.action_used
    }

    /// Whether the bonus action has been spent.
    pub fn bonus_used(&self) -> bool {
        self.bonus_used
    }

    /// Whether the reaction is still available.
    pub fn reaction_available(&self) -> bool {
        self.reaction_available
    }

    /// Feet of movement remaining.
    pub fn movement_left(&self) -> u32 {
        self.movement_left
    }

    /// Base speed the turn started with.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Resource state as of this point in the turn.
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Active conditions.
    pub fn conditions(&self) -> &BTreeSet<Condition> {
        &self.conditions
    }

    /// Transitions applied so far, oldest first.
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Whether action, bonus, reaction, and movement are all spent.
    pub fn is_closed(&self) -> bool {
        self.action_used && self.bonus_used && !self.reaction_available && self.movement_left == 0
    }

    /// Give up the turn's resource state for write-back.
    pub fn into_resources(self) -> ResourceRegistry {
        self.resources
    }

    /// The first incapacitating condition, if any.
    pub fn incapacitated_by(&self) -> Option<Condition> {
        self.conditions
            .iter()
            .copied()
            .find(|c| c.is_incapacitating())
    }

    /// Spend the action.
    pub fn use_action(&mut self, details: &str) -> RulesResult<()> {
        self.check_action()?;
        self.action_used = true;
        self.record(ActionKind::Action, details);
        Ok(())
    }

    /// Spend the bonus action.
    pub fn use_bonus(&mut self, details: &str) -> RulesResult<()> {
        self.check_bonus()?;
        self.bonus_used = true;
        self.record(ActionKind::Bonus, details);
        Ok(())
    }

    /// Spend the reaction.
    pub fn use_reaction(&mut self, details: &str) -> RulesResult<()> {
        self.check_reaction()?;
        self.reaction_available = false;
        self.record(ActionKind::Reaction, details);
        Ok(())
    }

    /// Spend feet of movement.
    pub fn use_movement(&mut self, distance: u32, details: &str) -> RulesResult<()> {
        check_movement(distance, self.movement_left)?;
        self.movement_left -= distance;
        self.record(ActionKind::Movement { distance }, details);
        Ok(())
    }

    /// Spend one use of a class resource.
    pub fn use_class_resource(&mut self, name: &str, details: &str) -> RulesResult<ResourcePool> {
        let pool = self.resources.consume(name)?;
        self.record(
            ActionKind::Resource {
                name: name.to_string(),
            },
            details,
        );
        Ok(pool)
    }

    /// Spend the action to gain the base speed in extra movement.
    pub fn dash(&mut self, details: &str) -> RulesResult<u32> {
        self.check_action()?;
        let gained = if self.speed_zeroed() { 0 } else { self.speed };
        self.action_used = true;
        self.movement_left += gained;
        self.record(ActionKind::Dash { gained }, details);
        Ok(gained)
    }

    /// Apply a condition. Returns false if it was already active.
    pub fn add_condition(&mut self, condition: Condition) -> bool {
        if !self.conditions.insert(condition) {
            return false;
        }
        if condition.zeroes_speed() {
            self.movement_left = 0;
        }
        self.record(ActionKind::ConditionAdded(condition), "");
        true
    }

    /// End a condition. Returns false if it was not active.
    ///
    /// Movement lost to the condition is not given back this turn.
    pub fn remove_condition(&mut self, condition: Condition) -> bool {
        if !self.conditions.remove(&condition) {
            return false;
        }
        self.record(ActionKind::ConditionRemoved(condition), "");
        true
    }

    pub(crate) fn check_action(&self) -> RulesResult<()> {
        self.check_able()?;
        if self.action_used {
            return Err(RulesError::ActionAlreadyUsed);
        }
        Ok(())
    }

    pub(crate) fn check_bonus(&self) -> RulesResult<()> {
        self.check_able()?;
        if self.bonus_used {
            return Err(RulesError::BonusAlreadyUsed);
        }
        Ok(())
    }

    pub(crate) fn check_reaction(&self) -> RulesResult<()> {
        self.check_able()?;
        if !self.reaction_available {
            return Err(RulesError::ReactionUnavailable);
        }
        Ok(())
    }

    fn check_able(&self) -> RulesResult<()> {
        match self.incapacitated_by() {
            Some(condition) => Err(RulesError::Incapacitated(condition)),
            None => Ok(()),
        }
    }

    fn speed_zeroed(&self) -> bool {
        self.conditions.iter().any(|c| c.zeroes_speed())
    }

    fn record(&mut self, kind: ActionKind, details: &str) {
        tracing::trace!(sequence = self.history.len(), %kind, "turn transition");
        self.history
            .push(ActionRecord::new(self.history.len(), kind, details));
    }
}

/// A fresh turn from a character's speed and a resource snapshot.
///
/// Resources are taken as given; resting is a separate operation.
pub fn reset_turn(character: &CharacterRecord, resources: ResourceRegistry) -> TurnState {
    let speed = character.combat().speed;
    TurnState {
        action_used: false,
        bonus_used: false,
        reaction_available: true,
        movement_left: speed,
        speed,
        resources,
        conditions: BTreeSet::new(),
        history: Vec::new(),
    }
}

pub(crate) fn check_movement(requested: u32, remaining: u32) -> RulesResult<()> {
    if requested > remaining {
        return Err(RulesError::InsufficientMovement {
            requested,
            remaining,
        });
    }
    Ok(())
}
