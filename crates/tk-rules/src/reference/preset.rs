//! Bundled SRD-style reference tables.
//!
//! These cover a handful of races, classes, and backgrounds so that the
//! engine is usable without external data. Embedding applications with a
//! full compendium load their own via [`ReferenceData::from_json`].

use std::collections::BTreeMap;

use crate::ability::{Ability, AbilityScores, Skill};
use crate::reference::{
    BackgroundEntry, ClassEntry, RaceEntry, ReferenceData, SkillChoice, StartingEquipment,
};
use crate::resources::{Recovery, ResourceSpec, UsesFormula};

/// The bundled reference tables.
pub fn srd() -> ReferenceData {
    ReferenceData {
        races: races(),
        classes: vec![
            fighter(),
            barbarian(),
            rogue(),
            wizard(),
            cleric(),
            monk(),
            paladin(),
        ],
        backgrounds: backgrounds(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn choices(options: &[&[&str]]) -> Vec<Vec<String>> {
    options.iter().map(|o| strings(o)).collect()
}

fn races() -> Vec<RaceEntry> {
    vec![
        RaceEntry {
            name: "Human".to_string(),
            ability_increases: Ability::ALL.into_iter().map(|a| (a, 1)).collect(),
            speed: 30,
        },
        RaceEntry {
            name: "Elf".to_string(),
            ability_increases: BTreeMap::from([(Ability::Dexterity, 2)]),
            speed: 30,
        },
        RaceEntry {
            name: "Dwarf".to_string(),
            ability_increases: BTreeMap::from([(Ability::Constitution, 2)]),
            speed: 25,
        },
        RaceEntry {
            name: "Halfling".to_string(),
            ability_increases: BTreeMap::from([(Ability::Dexterity, 2)]),
            speed: 25,
        },
    ]
}

/// Fighter: d10, STR/CON saves, Second Wind and Action Surge.
pub fn fighter() -> ClassEntry {
    ClassEntry {
        name: "Fighter".to_string(),
        hit_die: "1d10".to_string(),
        recommended: AbilityScores::from_array([15, 13, 14, 8, 12, 10]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::Acrobatics,
                Skill::AnimalHandling,
                Skill::Athletics,
                Skill::History,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Perception,
                Skill::Survival,
            ],
        },
        saving_throws: vec![Ability::Strength, Ability::Constitution],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Explorer's Pack"]),
            choices: choices(&[
                &["Chain Mail", "Leather Armor"],
                &["Longsword", "Battleaxe"],
                &["Shield", "Handaxe"],
                &["Light Crossbow", "Two Handaxes"],
            ]),
        },
        resources: vec![
            ResourceSpec::new("Second Wind", UsesFormula::Fixed(1), Recovery::ShortRest),
            ResourceSpec::new("Action Surge", UsesFormula::Fixed(1), Recovery::ShortRest),
        ],
        unarmored_defense: None,
    }
}

/// Barbarian: d12, Rage, CON-based unarmored defense.
pub fn barbarian() -> ClassEntry {
    ClassEntry {
        name: "Barbarian".to_string(),
        hit_die: "1d12".to_string(),
        recommended: AbilityScores::from_array([15, 13, 14, 8, 12, 10]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::AnimalHandling,
                Skill::Athletics,
                Skill::Intimidation,
                Skill::Nature,
                Skill::Perception,
                Skill::Survival,
            ],
        },
        saving_throws: vec![Ability::Strength, Ability::Constitution],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Explorer's Pack", "Four Javelins"]),
            choices: choices(&[&["Greataxe", "Battleaxe"], &["Two Handaxes", "Club"]]),
        },
        resources: vec![ResourceSpec::new(
            "Rage",
            UsesFormula::Fixed(2),
            Recovery::LongRest,
        )],
        unarmored_defense: Some(Ability::Constitution),
    }
}

/// Rogue: d8, four skills, no limited-use resources at first level.
pub fn rogue() -> ClassEntry {
    ClassEntry {
        name: "Rogue".to_string(),
        hit_die: "1d8".to_string(),
        recommended: AbilityScores::from_array([8, 15, 14, 12, 10, 13]),
        skill_choices: SkillChoice {
            choose: 4,
            from: vec![
                Skill::Acrobatics,
                Skill::Athletics,
                Skill::Deception,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Investigation,
                Skill::Perception,
                Skill::Performance,
                Skill::Persuasion,
                Skill::SleightOfHand,
                Skill::Stealth,
            ],
        },
        saving_throws: vec![Ability::Dexterity, Ability::Intelligence],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Leather Armor", "Two Daggers", "Thieves' Tools"]),
            choices: choices(&[
                &["Rapier", "Shortsword"],
                &["Shortbow", "Shortsword"],
                &["Burglar's Pack", "Dungeoneer's Pack"],
            ]),
        },
        resources: Vec::new(),
        unarmored_defense: None,
    }
}

/// Wizard: d6, INT/WIS saves, Arcane Recovery.
pub fn wizard() -> ClassEntry {
    ClassEntry {
        name: "Wizard".to_string(),
        hit_die: "1d6".to_string(),
        recommended: AbilityScores::from_array([8, 14, 13, 15, 12, 10]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::Arcana,
                Skill::History,
                Skill::Insight,
                Skill::Investigation,
                Skill::Medicine,
                Skill::Religion,
            ],
        },
        saving_throws: vec![Ability::Intelligence, Ability::Wisdom],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Spellbook"]),
            choices: choices(&[
                &["Quarterstaff", "Dagger"],
                &["Component Pouch", "Arcane Focus"],
                &["Scholar's Pack", "Explorer's Pack"],
            ]),
        },
        resources: vec![ResourceSpec::new(
            "Arcane Recovery",
            UsesFormula::Fixed(1),
            Recovery::LongRest,
        )],
        unarmored_defense: None,
    }
}

/// Cleric: d8, WIS/CHA saves, Channel Divinity.
pub fn cleric() -> ClassEntry {
    ClassEntry {
        name: "Cleric".to_string(),
        hit_die: "1d8".to_string(),
        recommended: AbilityScores::from_array([14, 8, 13, 10, 15, 12]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::History,
                Skill::Insight,
                Skill::Medicine,
                Skill::Persuasion,
                Skill::Religion,
            ],
        },
        saving_throws: vec![Ability::Wisdom, Ability::Charisma],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Shield", "Holy Symbol"]),
            choices: choices(&[
                &["Mace", "Warhammer"],
                &["Scale Mail", "Leather Armor", "Chain Mail"],
                &["Priest's Pack", "Explorer's Pack"],
            ]),
        },
        resources: vec![ResourceSpec::new(
            "Channel Divinity",
            UsesFormula::Fixed(1),
            Recovery::ShortRest,
        )],
        unarmored_defense: None,
    }
}

/// Monk: d8, Ki scaling with level, WIS-based unarmored defense.
pub fn monk() -> ClassEntry {
    ClassEntry {
        name: "Monk".to_string(),
        hit_die: "1d8".to_string(),
        recommended: AbilityScores::from_array([10, 15, 13, 8, 14, 12]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::Acrobatics,
                Skill::Athletics,
                Skill::History,
                Skill::Insight,
                Skill::Religion,
                Skill::Stealth,
            ],
        },
        saving_throws: vec![Ability::Strength, Ability::Dexterity],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Ten Darts"]),
            choices: choices(&[
                &["Shortsword", "Spear"],
                &["Dungeoneer's Pack", "Explorer's Pack"],
            ]),
        },
        resources: vec![ResourceSpec::new(
            "Ki",
            UsesFormula::PerLevel(1),
            Recovery::ShortRest,
        )],
        unarmored_defense: Some(Ability::Wisdom),
    }
}

/// Paladin: d10, Lay on Hands pool and Divine Sense.
pub fn paladin() -> ClassEntry {
    ClassEntry {
        name: "Paladin".to_string(),
        hit_die: "1d10".to_string(),
        recommended: AbilityScores::from_array([15, 10, 13, 8, 12, 14]),
        skill_choices: SkillChoice {
            choose: 2,
            from: vec![
                Skill::Athletics,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Medicine,
                Skill::Persuasion,
                Skill::Religion,
            ],
        },
        saving_throws: vec![Ability::Wisdom, Ability::Charisma],
        starting_equipment: StartingEquipment {
            fixed: strings(&["Chain Mail", "Holy Symbol"]),
            choices: choices(&[
                &["Longsword", "Warhammer"],
                &["Shield", "Handaxe"],
                &["Priest's Pack", "Explorer's Pack"],
            ]),
        },
        resources: vec![
            ResourceSpec::new("Lay on Hands", UsesFormula::PerLevel(5), Recovery::LongRest),
            ResourceSpec::new(
                "Divine Sense",
                UsesFormula::AbilityModifier(Ability::Charisma),
                Recovery::LongRest,
            ),
        ],
        unarmored_defense: None,
    }
}

fn backgrounds() -> Vec<BackgroundEntry> {
    vec![
        BackgroundEntry {
            name: "Soldier".to_string(),
            skills: vec![Skill::Athletics, Skill::Intimidation],
            equipment: strings(&["Insignia of Rank", "Set of Bone Dice", "Common Clothes"]),
            traits: strings(&[
                "I'm always polite and respectful.",
                "I can stare down a hell hound without flinching.",
                "I face problems head-on.",
            ]),
            ideals: strings(&["Greater Good", "Responsibility", "Might"]),
            bonds: strings(&[
                "I would still lay down my life for the people I served with.",
                "Someone saved my life on the battlefield.",
            ]),
            flaws: strings(&[
                "I obey the law, even if the law causes misery.",
                "I'd rather eat my armor than admit when I'm wrong.",
            ]),
        },
        BackgroundEntry {
            name: "Acolyte".to_string(),
            skills: vec![Skill::Insight, Skill::Religion],
            equipment: strings(&["Holy Symbol", "Prayer Book", "Vestments"]),
            traits: strings(&[
                "I quote sacred texts in almost every situation.",
                "I see omens in every event and action.",
            ]),
            ideals: strings(&["Tradition", "Charity", "Faith"]),
            bonds: strings(&["I owe my life to the priest who took me in."]),
            flaws: strings(&[
                "I judge others harshly, and myself even more severely.",
                "I am inflexible in my thinking.",
            ]),
        },
        BackgroundEntry {
            name: "Criminal".to_string(),
            skills: vec![Skill::Deception, Skill::Stealth],
            equipment: strings(&["Crowbar", "Dark Common Clothes"]),
            traits: strings(&[
                "I always have a plan for what to do when things go wrong.",
                "I am incredibly slow to trust.",
            ]),
            ideals: strings(&["Honor", "Freedom", "Greed"]),
            bonds: strings(&["I'm trying to pay off an old debt I owe."]),
            flaws: strings(&["When I see something valuable, I can't think about anything else."]),
        },
        BackgroundEntry {
            name: "Sage".to_string(),
            skills: vec![Skill::Arcana, Skill::History],
            equipment: strings(&["Bottle of Ink", "Quill", "Small Knife"]),
            traits: strings(&[
                "I use polysyllabic words that convey the impression of great erudition.",
                "I'm used to helping out those who aren't as smart as I am.",
            ]),
            ideals: strings(&["Knowledge", "Beauty", "Logic"]),
            bonds: strings(&["I have an ancient text that holds terrible secrets."]),
            flaws: strings(&["I am easily distracted by the promise of information."]),
        },
    ]
}
