//! Ability scores, modifiers, and proficiency entries.
//!
//! Modifiers are never a source of truth: every [`ProficiencyEntry`] is
//! recomputed from the linked ability score and the proficiency bonus
//! whenever either changes.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::{Die, Roll};
use crate::error::{RulesError, RulesResult};

/// One of the six base character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Physical power.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Endurance and health.
    Constitution,
    /// Reasoning and memory.
    Intelligence,
    /// Perception and insight.
    Wisdom,
    /// Force of personality.
    Charisma,
}

impl Ability {
    /// All six abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Three-letter abbreviation (e.g. "STR").
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// The eighteen skills, each linked to one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Balance and tumbling (DEX).
    Acrobatics,
    /// Calming and controlling animals (WIS).
    AnimalHandling,
    /// Magical lore (INT).
    Arcana,
    /// Climbing, jumping, swimming (STR).
    Athletics,
    /// Convincing lies (CHA).
    Deception,
    /// Historical lore (INT).
    History,
    /// Reading intentions (WIS).
    Insight,
    /// Threats and coercion (CHA).
    Intimidation,
    /// Deduction from clues (INT).
    Investigation,
    /// Stabilizing and diagnosing (WIS).
    Medicine,
    /// Terrain, plants, and beasts (INT).
    Nature,
    /// Noticing things (WIS).
    Perception,
    /// Entertaining an audience (CHA).
    Performance,
    /// Tactful influence (CHA).
    Persuasion,
    /// Deities and rites (INT).
    Religion,
    /// Manual trickery (DEX).
    SleightOfHand,
    /// Moving unseen (DEX).
    Stealth,
    /// Tracking and foraging (WIS).
    Survival,
}

impl Skill {
    /// All skills in alphabetical order.
    pub const ALL: [Skill; 18] = [
        Self::Acrobatics,
        Self::AnimalHandling,
        Self::Arcana,
        Self::Athletics,
        Self::Deception,
        Self::History,
        Self::Insight,
        Self::Intimidation,
        Self::Investigation,
        Self::Medicine,
        Self::Nature,
        Self::Perception,
        Self::Performance,
        Self::Persuasion,
        Self::Religion,
        Self::SleightOfHand,
        Self::Stealth,
        Self::Survival,
    ];

    /// The ability this skill is rolled with.
    pub fn ability(self) -> Ability {
        match self {
            Self::Athletics => Ability::Strength,
            Self::Acrobatics | Self::SleightOfHand | Self::Stealth => Ability::Dexterity,
            Self::Arcana
            | Self::History
            | Self::Investigation
            | Self::Nature
            | Self::Religion => Ability::Intelligence,
            Self::AnimalHandling
            | Self::Insight
            | Self::Medicine
            | Self::Perception
            | Self::Survival => Ability::Wisdom,
            Self::Deception | Self::Intimidation | Self::Performance | Self::Persuasion => {
                Ability::Charisma
            }
        }
    }

    /// Display name as printed on a sheet.
    pub fn name(self) -> &'static str {
        match self {
            Self::Acrobatics => "Acrobatics",
            Self::AnimalHandling => "Animal Handling",
            Self::Arcana => "Arcana",
            Self::Athletics => "Athletics",
            Self::Deception => "Deception",
            Self::History => "History",
            Self::Insight => "Insight",
            Self::Intimidation => "Intimidation",
            Self::Investigation => "Investigation",
            Self::Medicine => "Medicine",
            Self::Nature => "Nature",
            Self::Perception => "Perception",
            Self::Performance => "Performance",
            Self::Persuasion => "Persuasion",
            Self::Religion => "Religion",
            Self::SleightOfHand => "Sleight of Hand",
            Self::Stealth => "Stealth",
            Self::Survival => "Survival",
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The six raw ability scores (conventionally 1-30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    /// Strength score.
    pub strength: i32,
    /// Dexterity score.
    pub dexterity: i32,
    /// Constitution score.
    pub constitution: i32,
    /// Intelligence score.
    pub intelligence: i32,
    /// Wisdom score.
    pub wisdom: i32,
    /// Charisma score.
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    /// All six scores set to the same value.
    pub fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    /// Build from an array in [`Ability::ALL`] order.
    pub fn from_array(scores: [i32; 6]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] = scores;
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Get a score by ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set a score by ability.
    pub fn set(&mut self, ability: Ability, score: i32) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = score;
    }

    /// The modifier derived from an ability's current score.
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }

    /// Apply racial increases (missing abilities add 0).
    pub fn with_increases(mut self, increases: &BTreeMap<Ability, i32>) -> Self {
        for (ability, bonus) in increases {
            self.set(*ability, self.get(*ability) + bonus);
        }
        self
    }
}

/// `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    score.div_euclid(2) - 5
}

/// Level-scaled proficiency bonus: `floor((level - 1) / 4) + 2`.
pub fn proficiency_bonus(level: u32) -> RulesResult<i32> {
    if level == 0 {
        return Err(RulesError::InvalidLevel(level));
    }
    let steps = (level - 1) / 4;
    Ok(i32::try_from(steps).unwrap_or(i32::MAX - 2) + 2)
}

/// Modifier for a skill or save given the linked score and proficiency.
pub fn skill_modifier(ability_score: i32, proficient: bool, proficiency_bonus: i32) -> i32 {
    ability_modifier(ability_score) + if proficient { proficiency_bonus } else { 0 }
}

/// Roll six ability scores with 4d6, dropping the lowest die each time.
pub fn roll_ability_scores<R: Rng>(rng: &mut R) -> [i32; 6] {
    std::array::from_fn(|_| Roll::new(Die::D6, 4, rng).keep_highest(3) as i32)
}

/// Assign rolled values to abilities following a priority array.
///
/// The highest roll goes to the ability with the highest score in
/// `priority`; ties keep sheet order.
pub fn assign_by_priority(mut rolled: [i32; 6], priority: &AbilityScores) -> AbilityScores {
    rolled.sort_unstable();
    rolled.reverse();
    let mut order = Ability::ALL;
    order.sort_by_key(|a| Reverse(priority.get(*a)));

    let mut scores = AbilityScores::default();
    for (ability, value) in order.into_iter().zip(rolled) {
        scores.set(ability, value);
    }
    scores
}

/// A proficiency flag with its computed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyEntry {
    /// Whether the proficiency bonus applies.
    pub proficient: bool,
    /// Linked ability modifier plus the bonus when proficient.
    pub modifier: i32,
}

impl ProficiencyEntry {
    /// Compute an entry from its linked score.
    pub fn compute(ability_score: i32, proficient: bool, proficiency_bonus: i32) -> Self {
        Self {
            proficient,
            modifier: skill_modifier(ability_score, proficient, proficiency_bonus),
        }
    }
}

/// Saving throw and skill proficiency tables for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proficiencies {
    /// One entry per ability.
    pub saving_throws: BTreeMap<Ability, ProficiencyEntry>,
    /// One entry per skill.
    pub skills: BTreeMap<Skill, ProficiencyEntry>,
}

impl Proficiencies {
    /// Every save and skill unproficient, modifiers from the scores.
    pub fn untrained(scores: &AbilityScores) -> Self {
        let saving_throws = Ability::ALL
            .into_iter()
            .map(|a| (a, ProficiencyEntry::compute(scores.get(a), false, 0)))
            .collect();
        let skills = Skill::ALL
            .into_iter()
            .map(|s| (s, ProficiencyEntry::compute(scores.get(s.ability()), false, 0)))
            .collect();
        Self {
            saving_throws,
            skills,
        }
    }

    /// Mark a saving throw proficient and recompute its modifier.
    pub fn grant_save(&mut self, ability: Ability, scores: &AbilityScores, bonus: i32) {
        self.saving_throws.insert(
            ability,
            ProficiencyEntry::compute(scores.get(ability), true, bonus),
        );
    }

    /// Mark a skill proficient and recompute its modifier.
    pub fn grant_skill(&mut self, skill: Skill, scores: &AbilityScores, bonus: i32) {
        self.skills.insert(
            skill,
            ProficiencyEntry::compute(scores.get(skill.ability()), true, bonus),
        );
    }

    /// Recompute every modifier, keeping the proficient flags.
    pub fn recompute(&mut self, scores: &AbilityScores, bonus: i32) {
        for (ability, entry) in &mut self.saving_throws {
            *entry = ProficiencyEntry::compute(scores.get(*ability), entry.proficient, bonus);
        }
        for (skill, entry) in &mut self.skills {
            *entry = ProficiencyEntry::compute(scores.get(skill.ability()), entry.proficient, bonus);
        }
    }

    /// Get a skill entry (always present).
    pub fn skill(&self, skill: Skill) -> ProficiencyEntry {
        self.skills
            .get(&skill)
            .copied()
            .unwrap_or(ProficiencyEntry {
                proficient: false,
                modifier: 0,
            })
    }

    /// Get a saving throw entry (always present).
    pub fn save(&self, ability: Ability) -> ProficiencyEntry {
        self.saving_throws
            .get(&ability)
            .copied()
            .unwrap_or(ProficiencyEntry {
                proficient: false,
                modifier: 0,
            })
    }

    /// Skills currently marked proficient.
    pub fn proficient_skills(&self) -> Vec<Skill> {
        self.skills
            .iter()
            .filter(|(_, e)| e.proficient)
            .map(|(s, _)| *s)
            .collect()
    }
}
