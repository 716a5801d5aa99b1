//! Character derivation: turning reference tables and choices into a
//! complete [`CharacterRecord`].
//!
//! Guided creation uses exactly what the caller chose. Random creation
//! fills every unspecified choice from the supplied RNG, so a seeded
//! generator reproduces the same character every time.

pub mod equipment;

pub use equipment::{ItemCategory, classify, resolve_starting_equipment};

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::ability::{
    AbilityScores, Proficiencies, Skill, assign_by_priority, proficiency_bonus,
    roll_ability_scores,
};
use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};
use crate::reference::{BackgroundEntry, RaceEntry, ReferenceData, SkillChoice};
use crate::resources::create_resource_registry;
use crate::sheet::{
    CharacterRecord, CombatStats, DeathSaves, HitDice, Identity, Personality, passive_perception,
    recompute_armor_class, recompute_initiative, starting_hit_points,
};

/// Alignments sampled in random creation.
pub const ALIGNMENTS: &[&str] = &[
    "Lawful Good",
    "Neutral Good",
    "Chaotic Good",
    "Lawful Neutral",
    "True Neutral",
    "Chaotic Neutral",
    "Lawful Evil",
    "Neutral Evil",
    "Chaotic Evil",
];

/// How unspecified choices are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationMode {
    /// The caller makes every choice; first options are the fallback.
    Guided,
    /// Unspecified choices are sampled uniformly.
    Random,
}

/// What the caller knows about the character before derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInputs {
    /// Character name.
    pub name: String,
    /// Race name; required in guided mode.
    pub race: Option<String>,
    /// Class name; required in guided mode.
    pub class: Option<String>,
    /// Background name; required in guided mode.
    pub background: Option<String>,
    /// Alignment; blank in guided mode when unset.
    pub alignment: Option<String>,
    /// Chosen base scores (before racial increases). Defaults to the
    /// class's recommended array.
    pub ability_scores: Option<AbilityScores>,
    /// Class skill picks for guided mode.
    pub skill_choices: Vec<Skill>,
}

impl CreationInputs {
    /// Inputs for guided creation with the three table names set.
    pub fn guided(
        name: impl Into<String>,
        race: impl Into<String>,
        class: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            race: Some(race.into()),
            class: Some(class.into()),
            background: Some(background.into()),
            ..Self::default()
        }
    }

    /// Inputs for random creation with only a name.
    pub fn random(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the base ability scores.
    pub fn with_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = Some(scores);
        self
    }

    /// Set the class skill picks.
    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skill_choices = skills;
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }
}

/// Derive a complete character record.
pub fn derive_character<R: Rng>(
    inputs: &CreationInputs,
    mode: CreationMode,
    data: &ReferenceData,
    config: &RulesConfig,
    rng: &mut R,
) -> RulesResult<CharacterRecord> {
    config.validate()?;

    let race = pick_entry(inputs.race.as_deref(), &data.races, mode, rng, "race", |n| {
        data.race(n)
    })?;
    let class = pick_entry(inputs.class.as_deref(), &data.classes, mode, rng, "class", |n| {
        data.class(n)
    })?;
    let background = pick_entry(
        inputs.background.as_deref(),
        &data.backgrounds,
        mode,
        rng,
        "background",
        |n| data.background(n),
    )?;

    let level = config.starting_level;
    let bonus = proficiency_bonus(level)?;
    let die = class.die()?;

    let base = match (inputs.ability_scores, mode) {
        (Some(scores), _) => scores,
        (None, CreationMode::Random) if config.roll_ability_scores => {
            assign_by_priority(roll_ability_scores(rng), &class.recommended)
        }
        (None, _) => class.recommended,
    };
    let abilities = final_scores(base, race);

    let mut proficiencies = Proficiencies::untrained(&abilities);
    for save in &class.saving_throws {
        proficiencies.grant_save(*save, &abilities, bonus);
    }
    for skill in choose_skills(&class.skill_choices, &inputs.skill_choices, mode, rng)? {
        proficiencies.grant_skill(skill, &abilities, bonus);
    }
    for skill in &background.skills {
        proficiencies.grant_skill(*skill, &abilities, bonus);
    }

    let personality = match mode {
        CreationMode::Guided => Personality::default(),
        CreationMode::Random => roll_personality(background, rng),
    };
    let alignment = match (&inputs.alignment, mode) {
        (Some(a), _) => a.clone(),
        (None, CreationMode::Guided) => String::new(),
        (None, CreationMode::Random) => {
            ALIGNMENTS[rng.random_range(0..ALIGNMENTS.len())].to_string()
        }
    };

    let equipment =
        resolve_starting_equipment(&class.starting_equipment, &background.equipment, mode, rng);
    let max_hp = starting_hit_points(die, level, abilities.constitution);
    let resources = create_resource_registry(&class.resources, level, &abilities);

    let mut record = CharacterRecord {
        identity: Identity {
            name: inputs.name.clone(),
            race: race.name.clone(),
            class: class.name.clone(),
            background: background.name.clone(),
            level,
            alignment,
        },
        abilities,
        proficiency_bonus: bonus,
        combat: CombatStats {
            armor_class: 0,
            initiative: 0,
            speed: race.speed,
            max_hp,
            current_hp: max_hp,
            temp_hp: 0,
            hit_dice: HitDice {
                die,
                total: level,
                remaining: level,
            },
        },
        passive_perception: passive_perception(&proficiencies),
        proficiencies,
        equipment,
        personality,
        death_saves: DeathSaves::default(),
        unarmored_defense: class.unarmored_defense,
        resources,
    };
    record.combat.armor_class = recompute_armor_class(&record, config);
    record.combat.initiative = recompute_initiative(&record);

    tracing::debug!(
        name = %record.identity.name,
        race = %record.identity.race,
        class = %record.identity.class,
        background = %record.identity.background,
        ?mode,
        max_hp,
        armor_class = record.combat.armor_class,
        "character derived"
    );
    Ok(record)
}

/// Base scores plus racial increases, clamped to 1-30.
pub fn final_scores(base: AbilityScores, race: &RaceEntry) -> AbilityScores {
    let raised = base.with_increases(&race.ability_increases);
    let mut clamped = raised;
    for ability in crate::ability::Ability::ALL {
        clamped.set(ability, raised.get(ability).clamp(1, 30));
    }
    clamped
}

/// Resolve a class skill choice.
///
/// A `choose` larger than the list is clamped to the list length. Guided
/// picks must be exactly that many distinct skills from the list.
pub fn choose_skills<R: Rng>(
    choice: &SkillChoice,
    picked: &[Skill],
    mode: CreationMode,
    rng: &mut R,
) -> RulesResult<Vec<Skill>> {
    let count = choice.choose.min(choice.from.len());
    if count < choice.choose {
        tracing::warn!(
            requested = choice.choose,
            available = choice.from.len(),
            "skill choice count clamped"
        );
    }

    match mode {
        CreationMode::Random => Ok(index::sample(rng, choice.from.len(), count)
            .into_iter()
            .map(|i| choice.from[i])
            .collect()),
        CreationMode::Guided => {
            let mut distinct: Vec<Skill> = Vec::with_capacity(picked.len());
            for skill in picked {
                if !choice.from.contains(skill) {
                    return Err(RulesError::InvalidSelection(format!(
                        "{skill} is not a class skill option"
                    )));
                }
                if distinct.contains(skill) {
                    return Err(RulesError::InvalidSelection(format!(
                        "{skill} chosen more than once"
                    )));
                }
                distinct.push(*skill);
            }
            if distinct.len() != count {
                return Err(RulesError::InvalidSelection(format!(
                    "expected {count} class skills, got {}",
                    distinct.len()
                )));
            }
            Ok(distinct)
        }
    }
}

/// Sample one entry from each of a background's personality tables.
pub fn roll_personality<R: Rng>(background: &BackgroundEntry, rng: &mut R) -> Personality {
    let mut pick = |table: &[String]| -> String {
        if table.is_empty() {
            String::new()
        } else {
            table[rng.random_range(0..table.len())].clone()
        }
    };
    Personality {
        personality_trait: pick(&background.traits),
        ideal: pick(&background.ideals),
        bond: pick(&background.bonds),
        flaw: pick(&background.flaws),
    }
}

/// Look up a named entry, or sample one in random mode when unnamed.
fn pick_entry<'a, T, R: Rng>(
    name: Option<&str>,
    table: &'a [T],
    mode: CreationMode,
    rng: &mut R,
    kind: &'static str,
    lookup: impl FnOnce(&str) -> RulesResult<&'a T>,
) -> RulesResult<&'a T> {
    match (name, mode) {
        (Some(name), _) => lookup(name),
        (None, CreationMode::Random) if !table.is_empty() => {
            Ok(&table[rng.random_range(0..table.len())])
        }
        (None, _) => Err(RulesError::UnknownReferenceData {
            kind,
            name: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Ability;
    use crate::reference::preset;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn guided_fighter() -> CreationInputs {
        CreationInputs::guided("Bruni", "Dwarf", "Fighter", "Soldier")
            .with_scores(AbilityScores::from_array([15, 14, 13, 8, 12, 10]))
            .with_skills(vec![Skill::Perception, Skill::Survival])
    }

    fn derive(inputs: &CreationInputs, mode: CreationMode, seed: u64) -> RulesResult<CharacterRecord> {
        derive_character(
            inputs,
            mode,
            &preset::srd(),
            &RulesConfig::default(),
            &mut StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn guided_fighter_stats() {
        let pc = derive(&guided_fighter(), CreationMode::Guided, 0).unwrap();
        assert_eq!(pc.identity().race, "Dwarf");
        assert_eq!(pc.level(), 1);
        assert_eq!(pc.abilities().constitution, 15);
        assert_eq!(pc.combat().max_hp, 12);
        assert_eq!(pc.combat().current_hp, 12);
        assert_eq!(pc.combat().speed, 25);
        assert_eq!(pc.combat().initiative, 2);
        assert_eq!(pc.combat().armor_class, 18);
        assert_eq!(pc.proficiency_bonus(), 2);
        assert_eq!(pc.passive_perception(), 13);
        assert_eq!(pc.personality(), &Personality::default());
        assert_eq!(pc.identity().alignment, "");

        let saves = &pc.proficiencies().saving_throws;
        assert!(saves[&Ability::Strength].proficient);
        assert_eq!(saves[&Ability::Strength].modifier, 4);
        assert!(saves[&Ability::Constitution].proficient);
        assert!(!saves[&Ability::Dexterity].proficient);
        assert_eq!(saves[&Ability::Intelligence].modifier, -1);

        assert_eq!(
            pc.proficiencies().proficient_skills(),
            vec![
                Skill::Athletics,
                Skill::Intimidation,
                Skill::Perception,
                Skill::Survival
            ]
        );
        assert_eq!(pc.resources().len(), 2);
    }

    #[test]
    fn guided_equipment_first_options() {
        let pc = derive(&guided_fighter(), CreationMode::Guided, 0).unwrap();
        let eq = pc.equipment();
        assert_eq!(eq.armor.as_deref(), Some("Chain Mail"));
        assert_eq!(eq.shield.as_deref(), Some("Shield"));
        assert_eq!(eq.weapon1.as_deref(), Some("Longsword"));
        assert_eq!(eq.weapon2.as_deref(), Some("Light Crossbow"));
        assert!(eq.other.contains(&"Explorer's Pack".to_string()));
        assert!(eq.other.contains(&"Insignia of Rank".to_string()));
    }

    #[test]
    fn guided_missing_table_fails() {
        let mut inputs = guided_fighter();
        inputs.background = None;
        assert!(matches!(
            derive(&inputs, CreationMode::Guided, 0),
            Err(RulesError::UnknownReferenceData {
                kind: "background",
                ..
            })
        ));

        let inputs = CreationInputs::guided("X", "Orc", "Fighter", "Soldier");
        assert!(matches!(
            derive(&inputs, CreationMode::Guided, 0),
            Err(RulesError::UnknownReferenceData { kind: "race", .. })
        ));
    }

    #[test]
    fn guided_rejects_bad_skill_picks() {
        let bad = guided_fighter().with_skills(vec![Skill::Arcana, Skill::History]);
        assert!(matches!(
            derive(&bad, CreationMode::Guided, 0),
            Err(RulesError::InvalidSelection(_))
        ));
        let dup = guided_fighter().with_skills(vec![Skill::Perception, Skill::Perception]);
        assert!(matches!(
            derive(&dup, CreationMode::Guided, 0),
            Err(RulesError::InvalidSelection(_))
        ));
        let short = guided_fighter().with_skills(vec![Skill::Perception]);
        assert!(matches!(
            derive(&short, CreationMode::Guided, 0),
            Err(RulesError::InvalidSelection(_))
        ));
    }

    #[test]
    fn random_is_reproducible() {
        let inputs = CreationInputs::random("Nameless");
        let a = derive(&inputs, CreationMode::Random, 1234).unwrap();
        let b = derive(&inputs, CreationMode::Random, 1234).unwrap();
        assert_eq!(a, b);
        assert!(!a.personality().personality_trait.is_empty());
        assert!(ALIGNMENTS.contains(&a.identity().alignment.as_str()));
    }

    #[test]
    fn random_with_rolled_scores_is_reproducible() {
        let inputs = CreationInputs::random("Rolled");
        let config = RulesConfig::default().with_rolled_abilities(true);
        let data = preset::srd();
        let a = derive_character(
            &inputs,
            CreationMode::Random,
            &data,
            &config,
            &mut StdRng::seed_from_u64(77),
        )
        .unwrap();
        let b = derive_character(
            &inputs,
            CreationMode::Random,
            &data,
            &config,
            &mut StdRng::seed_from_u64(77),
        )
        .unwrap();
        assert_eq!(a, b);
        for ability in Ability::ALL {
            assert!((3..=20).contains(&a.abilities().get(ability)));
        }
    }

    #[test]
    fn skill_choice_scenario() {
        // choose 2 of {A, B, C}; background grants D.
        let a = Skill::Arcana;
        let b = Skill::History;
        let c = Skill::Nature;
        let d = Skill::Stealth;
        let mut data = preset::srd();
        let wizard = data.classes.iter_mut().find(|class| class.name == "Wizard").unwrap();
        wizard.skill_choices = SkillChoice {
            choose: 2,
            from: vec![a, b, c],
        };
        let sage = data
            .backgrounds
            .iter_mut()
            .find(|bg| bg.name == "Sage")
            .unwrap();
        sage.skills = vec![d];

        for seed in 0..20 {
            let inputs = CreationInputs {
                name: "Scenario".to_string(),
                race: Some("Elf".to_string()),
                class: Some("Wizard".to_string()),
                background: Some("Sage".to_string()),
                ..CreationInputs::default()
            };
            let pc = derive_character(
                &inputs,
                CreationMode::Random,
                &data,
                &RulesConfig::default(),
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap();
            let skills = pc.proficiencies().proficient_skills();
            let from_class = skills.iter().filter(|s| [a, b, c].contains(s)).count();
            assert_eq!(from_class, 2);
            assert!(skills.contains(&d));
            assert_eq!(skills.len(), 3);
        }
    }

    #[test]
    fn oversized_choice_is_clamped() {
        let choice = SkillChoice {
            choose: 5,
            from: vec![Skill::Arcana, Skill::History],
        };
        let mut rng = StdRng::seed_from_u64(0);
        let picked = choose_skills(&choice, &[], CreationMode::Random, &mut rng).unwrap();
        assert_eq!(picked.len(), 2);
        let guided = choose_skills(
            &choice,
            &[Skill::History, Skill::Arcana],
            CreationMode::Guided,
            &mut rng,
        )
        .unwrap();
        assert_eq!(guided, vec![Skill::History, Skill::Arcana]);
    }

    #[test]
    fn low_constitution_still_has_one_hp() {
        let inputs = CreationInputs::guided("Frail", "Elf", "Wizard", "Sage")
            .with_scores(AbilityScores::from_array([8, 14, 1, 15, 12, 10]))
            .with_skills(vec![Skill::Arcana, Skill::Medicine]);
        let pc = derive(&inputs, CreationMode::Guided, 0).unwrap();
        assert_eq!(pc.combat().max_hp, 1);
    }

    #[test]
    fn barbarian_unarmored_defense() {
        let inputs = CreationInputs::guided("Ulfa", "Human", "Barbarian", "Soldier")
            .with_scores(AbilityScores::from_array([15, 13, 14, 8, 12, 10]))
            .with_skills(vec![Skill::Nature, Skill::Survival]);
        let pc = derive(&inputs, CreationMode::Guided, 0).unwrap();
        // Human: DEX 15 (+2), CON 15 (+2), no armor.
        assert!(pc.equipment().armor.is_none());
        assert_eq!(pc.combat().armor_class, 14);
        assert_eq!(pc.resources().get("Rage").unwrap().max_uses, 2);
    }
}
