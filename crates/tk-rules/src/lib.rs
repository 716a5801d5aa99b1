//! Rules engine for solo tabletop play.
//!
//! Derives a character's combat statistics from ability scores, race,
//! class, and background, then enforces the per-turn action economy:
//! one action, one bonus action, one reaction, a movement budget, and
//! class resources that recover on rests. Everything here is synchronous
//! and free of I/O; randomness always comes from a caller-supplied RNG.
//!
//! The usual flow:
//!
//! 1. [`derive_character`] builds a [`CharacterRecord`] from
//!    [`ReferenceData`] (the bundled [`reference::preset::srd`] tables or
//!    your own JSON).
//! 2. [`TurnState::reset`] opens a turn from the record.
//! 3. [`validate`] checks a batch of [`ProposedAction`]s, and [`commit`]
//!    applies it.
//! 4. [`CharacterRecord::end_turn`] writes resource use back to the record.

pub mod ability;
pub mod config;
pub mod derive;
pub mod dice;
pub mod error;
pub mod reference;
pub mod resources;
pub mod sheet;
pub mod turn;
pub mod validate;

pub use ability::{
    Ability, AbilityScores, Proficiencies, ProficiencyEntry, Skill, ability_modifier,
    proficiency_bonus, skill_modifier,
};
pub use config::{HpGain, RulesConfig};
pub use derive::{CreationInputs, CreationMode, derive_character};
pub use dice::{Die, Roll};
pub use error::{RulesError, RulesResult};
pub use reference::ReferenceData;
pub use resources::{
    Recovery, ResourcePool, ResourceRegistry, ResourceSpec, RestKind, UsesFormula,
    create_resource_registry, recover_resources,
};
pub use sheet::{CharacterRecord, DeathSaves, DeathState, EquipmentSlot, EquipmentSlots};
pub use turn::{ActionKind, ActionRecord, Condition, TurnState, reset_turn};
pub use validate::{ProposedAction, Slot, ValidationIssue, ValidationResult, commit, validate};
