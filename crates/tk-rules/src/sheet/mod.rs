//! The canonical character record.
//!
//! A [`CharacterRecord`] is created once by [`crate::derive`] with every
//! field populated. After that it only changes through the named
//! operations here and in the [`health`] and [`progression`] modules, each
//! of which recomputes the derived fields it touches.

pub mod armor;
pub mod health;
pub mod progression;

pub use armor::{recompute_armor_class, recompute_initiative};
pub use health::{DeathSaves, DeathState};

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores, Proficiencies, Skill, ability_modifier};
use crate::config::RulesConfig;
use crate::dice::Die;
use crate::resources::ResourceRegistry;
use crate::turn::TurnState;

/// Who the character is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Character name.
    pub name: String,
    /// Race name.
    pub race: String,
    /// Class name.
    pub class: String,
    /// Background name.
    pub background: String,
    /// Character level (1-20).
    pub level: u32,
    /// Alignment (free text).
    pub alignment: String,
}

/// Hit dice available for short-rest healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    /// The class hit die.
    pub die: Die,
    /// One die per level.
    pub total: u32,
    /// Dice not yet spent.
    pub remaining: u32,
}

/// Derived combat statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Current armor class.
    pub armor_class: i32,
    /// Initiative bonus.
    pub initiative: i32,
    /// Walking speed in feet.
    pub speed: u32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Current hit points (0 to `max_hp`).
    pub current_hp: i32,
    /// Temporary hit points, spent before `current_hp`.
    pub temp_hp: i32,
    /// Hit dice pool.
    pub hit_dice: HitDice,
}

/// An equipment slot that affects derived stats or attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    /// Worn armor.
    Armor,
    /// Carried shield.
    Shield,
    /// Primary weapon.
    Weapon1,
    /// Secondary weapon.
    Weapon2,
}

/// Equipped items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentSlots {
    /// Worn armor.
    pub armor: Option<String>,
    /// Carried shield.
    pub shield: Option<String>,
    /// Primary weapon.
    pub weapon1: Option<String>,
    /// Secondary weapon.
    pub weapon2: Option<String>,
    /// Everything that fits no other slot.
    pub other: Vec<String>,
}

impl EquipmentSlots {
    /// Get the item in a slot.
    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::Armor => self.armor.as_deref(),
            EquipmentSlot::Shield => self.shield.as_deref(),
            EquipmentSlot::Weapon1 => self.weapon1.as_deref(),
            EquipmentSlot::Weapon2 => self.weapon2.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<String> {
        match slot {
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Shield => &mut self.shield,
            EquipmentSlot::Weapon1 => &mut self.weapon1,
            EquipmentSlot::Weapon2 => &mut self.weapon2,
        }
    }

    /// The miscellaneous items as one comma-joined string.
    pub fn other_list(&self) -> String {
        self.other.join(", ")
    }
}

/// Roleplaying notes. Empty strings mean "not yet written".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Personality {
    /// Personality trait.
    pub personality_trait: String,
    /// Ideal.
    pub ideal: String,
    /// Bond.
    pub bond: String,
    /// Flaw.
    pub flaw: String,
}

/// A fully derived character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub(crate) identity: Identity,
    pub(crate) abilities: AbilityScores,
    pub(crate) proficiency_bonus: i32,
    pub(crate) combat: CombatStats,
    pub(crate) proficiencies: Proficiencies,
    pub(crate) passive_perception: i32,
    pub(crate) equipment: EquipmentSlots,
    pub(crate) personality: Personality,
    pub(crate) death_saves: DeathSaves,
    pub(crate) unarmored_defense: Option<Ability>,
    pub(crate) resources: ResourceRegistry,
}

impl CharacterRecord {
    /// Identity fields.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Character level.
    pub fn level(&self) -> u32 {
        self.identity.level
    }

    /// Ability scores.
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    /// Current proficiency bonus.
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    /// Combat statistics.
    pub fn combat(&self) -> &CombatStats {
        &self.combat
    }

    /// Saving throw and skill proficiencies.
    pub fn proficiencies(&self) -> &Proficiencies {
        &self.proficiencies
    }

    /// 10 + Perception modifier.
    pub fn passive_perception(&self) -> i32 {
        self.passive_perception
    }

    /// Equipped items.
    pub fn equipment(&self) -> &EquipmentSlots {
        &self.equipment
    }

    /// Personality notes.
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    /// Death save counters.
    pub fn death_saves(&self) -> &DeathSaves {
        &self.death_saves
    }

    /// Ability added to unarmored AC, if the class grants one.
    pub fn unarmored_defense(&self) -> Option<Ability> {
        self.unarmored_defense
    }

    /// Limited-use class resources.
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Mutable access to class resources (for designer-defined effects).
    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.resources
    }

    /// Replace the personality notes (manual entry after guided creation).
    pub fn set_personality(&mut self, personality: Personality) {
        self.personality = personality;
    }

    /// Put an item in a slot (or empty it) and return what was there.
    ///
    /// Armor class is recomputed afterwards.
    pub fn change_equipment(
        &mut self,
        slot: EquipmentSlot,
        item: Option<String>,
        config: &RulesConfig,
    ) -> Option<String> {
        let previous = std::mem::replace(self.equipment.slot_mut(slot), item);
        self.combat.armor_class = recompute_armor_class(self, config);
        previous
    }

    /// Add an item to the miscellaneous list.
    pub fn add_other_equipment(&mut self, item: impl Into<String>) {
        self.equipment.other.push(item.into());
    }

    /// Change an ability score and recompute everything derived from it.
    ///
    /// A constitution change adjusts maximum hit points retroactively
    /// (one point per level per modifier step).
    pub fn set_ability_score(&mut self, ability: Ability, score: i32, config: &RulesConfig) {
        let old_con = self.abilities.modifier(Ability::Constitution);
        self.abilities.set(ability, score.clamp(1, 30));

        let con_delta = self.abilities.modifier(Ability::Constitution) - old_con;
        if con_delta != 0 {
            self.combat.max_hp = (self.combat.max_hp + con_delta * self.level() as i32).max(1);
            self.combat.current_hp = self.combat.current_hp.min(self.combat.max_hp);
        }
        self.refresh_derived(config);
    }

    /// Write back the resource state a finished turn consumed from.
    pub fn end_turn(&mut self, turn: TurnState) {
        self.resources = turn.into_resources();
    }

    /// Recompute proficiency modifiers, passive perception, armor class,
    /// initiative, and resource maxima from the current scores and level.
    pub(crate) fn refresh_derived(&mut self, config: &RulesConfig) {
        self.proficiencies
            .recompute(&self.abilities, self.proficiency_bonus);
        self.passive_perception = passive_perception(&self.proficiencies);
        self.combat.armor_class = recompute_armor_class(self, config);
        self.combat.initiative = recompute_initiative(self);
        self.resources.rescale(self.identity.level, &self.abilities);
    }
}

/// 10 + Perception modifier.
pub fn passive_perception(proficiencies: &Proficiencies) -> i32 {
    10 + proficiencies.skill(Skill::Perception).modifier
}

/// Hit points at a level with fixed (average) gains after first level.
pub(crate) fn starting_hit_points(die: Die, level: u32, constitution: i32) -> i32 {
    let con = ability_modifier(constitution);
    let first = (die.sides() as i32 + con).max(1);
    let later = (die.average() as i32 + con).max(1);
    first + later * level.saturating_sub(1) as i32
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::derive::{CreationInputs, CreationMode, derive_character};
    use crate::reference::preset;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A guided level-1 dwarf fighter with a fixed array.
    pub(crate) fn fighter() -> CharacterRecord {
        let inputs = CreationInputs::guided("Bruni", "Dwarf", "Fighter", "Soldier")
            .with_scores(AbilityScores::from_array([15, 14, 13, 8, 12, 10]))
            .with_skills(vec![Skill::Perception, Skill::Survival]);
        let mut rng = StdRng::seed_from_u64(1);
        derive_character(
            &inputs,
            CreationMode::Guided,
            &preset::srd(),
            &RulesConfig::default(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn starting_hit_points_formula() {
        assert_eq!(starting_hit_points(Die::D10, 1, 15), 12);
        assert_eq!(starting_hit_points(Die::D6, 1, 3), 2);
        assert_eq!(starting_hit_points(Die::D6, 1, 1), 1);
        assert_eq!(starting_hit_points(Die::D8, 3, 14), 10 + 7 + 7);
    }

    #[test]
    fn change_equipment_recomputes_ac() {
        let cfg = RulesConfig::default();
        let mut pc = fighter();
        // Guided creation takes the first option: chain mail + shield.
        assert_eq!(pc.combat().armor_class, 18);

        let old = pc.change_equipment(EquipmentSlot::Shield, None, &cfg);
        assert_eq!(old.as_deref(), Some("Shield"));
        assert_eq!(pc.combat().armor_class, 16);

        pc.change_equipment(EquipmentSlot::Armor, Some("Leather Armor".to_string()), &cfg);
        assert_eq!(pc.combat().armor_class, 13);
        assert_eq!(pc.combat().armor_class, recompute_armor_class(&pc, &cfg));
    }

    #[test]
    fn set_ability_score_refreshes_derived_fields() {
        let cfg = RulesConfig::default();
        let mut pc = fighter();
        pc.change_equipment(EquipmentSlot::Armor, None, &cfg);
        pc.change_equipment(EquipmentSlot::Shield, None, &cfg);
        assert_eq!(pc.combat().armor_class, 12);

        pc.set_ability_score(Ability::Dexterity, 18, &cfg);
        assert_eq!(pc.combat().armor_class, 14);
        assert_eq!(pc.combat().initiative, 4);
        assert_eq!(pc.proficiencies().skill(Skill::Acrobatics).modifier, 4);
        assert_eq!(pc.proficiencies().save(Ability::Dexterity).modifier, 4);
    }

    #[test]
    fn set_constitution_adjusts_max_hp() {
        let cfg = RulesConfig::default();
        let mut pc = fighter();
        let before = pc.combat().max_hp;
        pc.set_ability_score(Ability::Constitution, 17, &cfg);
        assert_eq!(pc.combat().max_hp, before + 1);
        assert!(pc.combat().current_hp <= pc.combat().max_hp);
    }

    #[test]
    fn set_wisdom_updates_passive_perception() {
        let cfg = RulesConfig::default();
        let mut pc = fighter();
        assert_eq!(pc.passive_perception(), 10 + 1 + 2);
        pc.set_ability_score(Ability::Wisdom, 16, &cfg);
        assert_eq!(pc.passive_perception(), 10 + 3 + 2);
    }

    #[test]
    fn other_list_is_comma_joined() {
        let mut pc = fighter();
        pc.add_other_equipment("Rope");
        assert!(pc.equipment().other_list().ends_with(", Rope"));
    }
}
