//! Armor class and initiative resolution.
//!
//! Both are pure functions of the character's scores and equipment and are
//! called explicitly after any change to armor, shield, or dexterity.

use crate::ability::{Ability, AbilityScores};
use crate::config::RulesConfig;
use crate::sheet::CharacterRecord;

/// Weight class of a suit of armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorCategory {
    /// Base + full dexterity modifier.
    Light,
    /// Base + dexterity modifier up to a cap.
    Medium,
    /// Fixed base, dexterity ignored.
    Heavy,
}

/// One row of the armor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorEntry {
    /// Lowercase name matched against equipment text.
    pub name: &'static str,
    /// Weight class.
    pub category: ArmorCategory,
    /// Base armor class.
    pub base: i32,
}

const fn armor(name: &'static str, category: ArmorCategory, base: i32) -> ArmorEntry {
    ArmorEntry {
        name,
        category,
        base,
    }
}

/// The fixed armor table.
pub const ARMOR_TABLE: &[ArmorEntry] = &[
    armor("padded", ArmorCategory::Light, 11),
    armor("leather", ArmorCategory::Light, 11),
    armor("studded leather", ArmorCategory::Light, 12),
    armor("hide", ArmorCategory::Medium, 12),
    armor("chain shirt", ArmorCategory::Medium, 13),
    armor("scale mail", ArmorCategory::Medium, 14),
    armor("breastplate", ArmorCategory::Medium, 14),
    armor("half plate", ArmorCategory::Medium, 15),
    armor("ring mail", ArmorCategory::Heavy, 14),
    armor("chain mail", ArmorCategory::Heavy, 16),
    armor("splint", ArmorCategory::Heavy, 17),
    armor("plate", ArmorCategory::Heavy, 18),
];

/// Find the armor entry an item name refers to.
///
/// Matching is case-insensitive containment; the longest matching table
/// name wins so "Studded Leather" is not read as "Leather".
pub fn lookup_armor(item: &str) -> Option<&'static ArmorEntry> {
    let lower = item.to_lowercase();
    ARMOR_TABLE
        .iter()
        .filter(|entry| lower.contains(entry.name))
        .max_by_key(|entry| entry.name.len())
}

/// Armor class from raw inputs.
pub fn armor_class(
    scores: &AbilityScores,
    armor: Option<&str>,
    shield: bool,
    unarmored_defense: Option<Ability>,
    config: &RulesConfig,
) -> i32 {
    let dex = scores.modifier(Ability::Dexterity);
    let unarmored = || 10 + dex + unarmored_defense.map_or(0, |a| scores.modifier(a));

    let body = match armor {
        None => unarmored(),
        Some(item) => match lookup_armor(item) {
            Some(entry) => match entry.category {
                ArmorCategory::Light => entry.base + dex,
                ArmorCategory::Medium => entry.base + dex.min(config.medium_armor_dex_cap),
                ArmorCategory::Heavy => entry.base,
            },
            None => {
                tracing::warn!(item, "unrecognized armor, treating as unarmored");
                unarmored()
            }
        },
    };

    if shield {
        body + config.shield_bonus
    } else {
        body
    }
}

/// Recompute a character's armor class from its current equipment.
pub fn recompute_armor_class(character: &CharacterRecord, config: &RulesConfig) -> i32 {
    let equipment = character.equipment();
    armor_class(
        character.abilities(),
        equipment.armor.as_deref(),
        equipment.shield.is_some(),
        character.unarmored_defense(),
        config,
    )
}

/// Recompute a character's initiative bonus.
pub fn recompute_initiative(character: &CharacterRecord) -> i32 {
    character.abilities().modifier(Ability::Dexterity)
}
