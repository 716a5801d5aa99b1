//! Race, class, and background reference tables.
//!
//! Reference data is supplied by the embedding application, either built
//! programmatically, loaded with [`ReferenceData::from_json`], or taken
//! from the bundled [`preset::srd`] tables.

pub mod preset;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores, Skill};
use crate::dice::Die;
use crate::error::{RulesError, RulesResult};
use crate::resources::ResourceSpec;

/// A playable race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceEntry {
    /// Race name (e.g., "Dwarf").
    pub name: String,
    /// Ability score increases; missing abilities add 0.
    #[serde(default)]
    pub ability_increases: BTreeMap<Ability, i32>,
    /// Walking speed in feet.
    pub speed: u32,
}

/// A class skill choice: pick `choose` skills from `from`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillChoice {
    /// How many skills to pick.
    pub choose: usize,
    /// Skills to pick from.
    pub from: Vec<Skill>,
}

/// Starting equipment rules for a class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartingEquipment {
    /// Items granted unconditionally.
    #[serde(default)]
    pub fixed: Vec<String>,
    /// Each inner list is one choice; exactly one option is taken.
    #[serde(default)]
    pub choices: Vec<Vec<String>>,
}

/// A character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Class name (e.g., "Fighter").
    pub name: String,
    /// Hit die as written (e.g., "1d10").
    pub hit_die: String,
    /// Recommended ability array for quick builds.
    pub recommended: AbilityScores,
    /// Skill proficiency choice.
    #[serde(default)]
    pub skill_choices: SkillChoice,
    /// Saving throw proficiencies.
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    /// Starting equipment rules.
    #[serde(default)]
    pub starting_equipment: StartingEquipment,
    /// Limited-use class resources.
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
    /// Extra ability added to unarmored AC (e.g., CON for barbarians).
    #[serde(default)]
    pub unarmored_defense: Option<Ability>,
}

impl ClassEntry {
    /// Parse the class hit die.
    pub fn die(&self) -> RulesResult<Die> {
        Die::parse(&self.hit_die).ok_or_else(|| {
            RulesError::InvalidConfig(format!(
                "class '{}' has malformed hit die '{}'",
                self.name, self.hit_die
            ))
        })
    }
}

/// A character background.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackgroundEntry {
    /// Background name (e.g., "Soldier").
    pub name: String,
    /// Fixed skill proficiencies.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Equipment granted by the background.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Personality trait table.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Ideal table.
    #[serde(default)]
    pub ideals: Vec<String>,
    /// Bond table.
    #[serde(default)]
    pub bonds: Vec<String>,
    /// Flaw table.
    #[serde(default)]
    pub flaws: Vec<String>,
}

/// The complete set of reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Available races.
    #[serde(default)]
    pub races: Vec<RaceEntry>,
    /// Available classes.
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    /// Available backgrounds.
    #[serde(default)]
    pub backgrounds: Vec<BackgroundEntry>,
}

impl ReferenceData {
    /// Load reference tables from JSON.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a race by name (case-insensitive).
    pub fn race(&self, name: &str) -> RulesResult<&RaceEntry> {
        find(&self.races, name, |r| &r.name, "race")
    }

    /// Find a class by name (case-insensitive).
    pub fn class(&self, name: &str) -> RulesResult<&ClassEntry> {
        find(&self.classes, name, |c| &c.name, "class")
    }

    /// Find a background by name (case-insensitive).
    pub fn background(&self, name: &str) -> RulesResult<&BackgroundEntry> {
        find(&self.backgrounds, name, |b| &b.name, "background")
    }
}

fn find<'a, T>(
    entries: &'a [T],
    name: &str,
    name_of: impl Fn(&T) -> &String,
    kind: &'static str,
) -> RulesResult<&'a T> {
    entries
        .iter()
        .find(|e| name_of(e).eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| RulesError::UnknownReferenceData {
            kind,
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let data = preset::srd();
        assert_eq!(data.race("dwarf").unwrap().name, "Dwarf");
        assert_eq!(data.class("FIGHTER").unwrap().name, "Fighter");
        assert_eq!(data.background(" Sage ").unwrap().name, "Sage");
    }

    #[test]
    fn lookup_unknown_fails() {
        let data = preset::srd();
        let err = data.class("Gunslinger").unwrap_err();
        assert!(matches!(
            err,
            RulesError::UnknownReferenceData { kind: "class", ref name } if name == "Gunslinger"
        ));
        assert_eq!(err.to_string(), "unknown class: Gunslinger");
    }

    #[test]
    fn class_die_parses() {
        let data = preset::srd();
        assert_eq!(data.class("Barbarian").unwrap().die().unwrap(), Die::D12);
        assert_eq!(data.class("Wizard").unwrap().die().unwrap(), Die::D6);

        let mut broken = data.class("Wizard").unwrap().clone();
        broken.hit_die = "six".to_string();
        assert!(matches!(broken.die(), Err(RulesError::InvalidConfig(_))));
    }

    #[test]
    fn from_json_reads_tables() {
        let json = r#"{
            "races": [{ "name": "Gnome", "ability_increases": { "intelligence": 2 }, "speed": 25 }],
            "classes": [{
                "name": "Bard",
                "hit_die": "1d8",
                "recommended": { "strength": 8, "dexterity": 14, "constitution": 13,
                                 "intelligence": 10, "wisdom": 12, "charisma": 15 },
                "skill_choices": { "choose": 3, "from": ["performance", "persuasion", "deception", "history"] },
                "saving_throws": ["dexterity", "charisma"],
                "resources": [{ "name": "Bardic Inspiration",
                                "uses": { "ability_modifier": "charisma" },
                                "recovery": "long_rest" }]
            }],
            "backgrounds": [{ "name": "Entertainer", "skills": ["acrobatics", "performance"] }]
        }"#;
        let data = ReferenceData::from_json(json).unwrap();
        let gnome = data.race("gnome").unwrap();
        assert_eq!(gnome.ability_increases.get(&Ability::Intelligence), Some(&2));
        let bard = data.class("bard").unwrap();
        assert_eq!(bard.skill_choices.choose, 3);
        assert_eq!(bard.resources.len(), 1);
        assert!(bard.starting_equipment.fixed.is_empty());
        assert_eq!(
            data.background("entertainer").unwrap().skills,
            vec![Skill::Acrobatics, Skill::Performance]
        );
    }

    #[test]
    fn from_json_malformed() {
        assert!(matches!(
            ReferenceData::from_json("[1, 2"),
            Err(RulesError::Json(_))
        ));
    }
}
