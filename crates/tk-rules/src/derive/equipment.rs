//! Starting equipment resolution and slot classification.

use rand::Rng;

use crate::derive::CreationMode;
use crate::reference::StartingEquipment;
use crate::sheet::EquipmentSlots;
use crate::sheet::armor::lookup_armor;

/// Name fragments that mark an item as a weapon.
const WEAPON_KEYWORDS: &[&str] = &[
    "sword",
    "axe",
    "bow",
    "mace",
    "dagger",
    "spear",
    "staff",
    "hammer",
    "javelin",
    "rapier",
    "scimitar",
    "club",
    "dart",
    "sling",
    "whip",
    "flail",
    "glaive",
    "halberd",
    "lance",
    "maul",
    "morningstar",
    "pike",
    "trident",
    "sickle",
];

/// Which kind of slot an item belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Goes in `weapon1` or `weapon2`.
    Weapon,
    /// Goes in `armor`.
    Armor,
    /// Goes in `shield`.
    Shield,
    /// Goes in `other`.
    Other,
}

/// Classify an item by keyword.
pub fn classify(item: &str) -> ItemCategory {
    let lower = item.to_lowercase();
    if lower.contains("shield") {
        ItemCategory::Shield
    } else if lookup_armor(&lower).is_some() || lower.contains("armor") {
        ItemCategory::Armor
    } else if WEAPON_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ItemCategory::Weapon
    } else {
        ItemCategory::Other
    }
}

/// Put an item in the first free slot its category allows.
///
/// A second weapon always lands in `weapon2`, even when it is the same
/// kind as the first; only a third weapon spills into `other`.
pub fn place(slots: &mut EquipmentSlots, item: &str) {
    let target = match classify(item) {
        ItemCategory::Armor => Some(&mut slots.armor),
        ItemCategory::Shield => Some(&mut slots.shield),
        ItemCategory::Weapon if slots.weapon1.is_none() => Some(&mut slots.weapon1),
        ItemCategory::Weapon => Some(&mut slots.weapon2),
        ItemCategory::Other => None,
    };
    match target {
        Some(slot) if slot.is_none() => *slot = Some(item.to_string()),
        _ => slots.other.push(item.to_string()),
    }
}

/// Resolve class and background equipment into slots.
///
/// Fixed items are always taken. For each choice, guided creation takes
/// the first option and random creation picks one uniformly.
pub fn resolve_starting_equipment<R: Rng>(
    rules: &StartingEquipment,
    background_items: &[String],
    mode: CreationMode,
    rng: &mut R,
) -> EquipmentSlots {
    let mut slots = EquipmentSlots::default();
    for item in &rules.fixed {
        place(&mut slots, item);
    }
    for options in &rules.choices {
        let picked = match mode {
            CreationMode::Guided => options.first(),
            CreationMode::Random if options.is_empty() => None,
            CreationMode::Random => options.get(rng.random_range(0..options.len())),
        };
        if let Some(item) = picked {
            place(&mut slots, item);
        }
    }
    for item in background_items {
        place(&mut slots, item);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn classify_by_keyword() {
        assert_eq!(classify("Shield"), ItemCategory::Shield);
        assert_eq!(classify("Chain Mail"), ItemCategory::Armor);
        assert_eq!(classify("Leather Armor"), ItemCategory::Armor);
        assert_eq!(classify("Longsword"), ItemCategory::Weapon);
        assert_eq!(classify("Two Handaxes"), ItemCategory::Weapon);
        assert_eq!(classify("Light Crossbow"), ItemCategory::Weapon);
        assert_eq!(classify("Warhammer"), ItemCategory::Weapon);
        assert_eq!(classify("Explorer's Pack"), ItemCategory::Other);
        assert_eq!(classify("Crowbar"), ItemCategory::Other);
    }

    #[test]
    fn second_weapon_of_same_kind_goes_to_weapon2() {
        let mut slots = EquipmentSlots::default();
        place(&mut slots, "Dagger");
        place(&mut slots, "Dagger");
        place(&mut slots, "Dagger");
        assert_eq!(slots.weapon1.as_deref(), Some("Dagger"));
        assert_eq!(slots.weapon2.as_deref(), Some("Dagger"));
        assert_eq!(slots.other, vec!["Dagger".to_string()]);
    }

    #[test]
    fn occupied_armor_spills_into_other() {
        let mut slots = EquipmentSlots::default();
        place(&mut slots, "Chain Mail");
        place(&mut slots, "Leather Armor");
        place(&mut slots, "Rope");
        assert_eq!(slots.armor.as_deref(), Some("Chain Mail"));
        assert_eq!(slots.other_list(), "Leather Armor, Rope");
    }

    #[test]
    fn guided_takes_first_options() {
        let rules = StartingEquipment {
            fixed: vec!["Explorer's Pack".to_string()],
            choices: vec![
                vec!["Chain Mail".to_string(), "Leather Armor".to_string()],
                vec!["Longsword".to_string(), "Battleaxe".to_string()],
                vec![],
            ],
        };
        let mut rng = StdRng::seed_from_u64(0);
        let slots = resolve_starting_equipment(
            &rules,
            &["Common Clothes".to_string()],
            CreationMode::Guided,
            &mut rng,
        );
        assert_eq!(slots.armor.as_deref(), Some("Chain Mail"));
        assert_eq!(slots.weapon1.as_deref(), Some("Longsword"));
        assert_eq!(slots.other_list(), "Explorer's Pack, Common Clothes");
    }

    #[test]
    fn random_picks_one_per_choice_reproducibly() {
        let rules = StartingEquipment {
            fixed: vec![],
            choices: vec![
                vec!["Rapier".to_string(), "Shortsword".to_string()],
                vec!["Shield".to_string(), "Club".to_string()],
            ],
        };
        let a = resolve_starting_equipment(
            &rules,
            &[],
            CreationMode::Random,
            &mut StdRng::seed_from_u64(9),
        );
        let b = resolve_starting_equipment(
            &rules,
            &[],
            CreationMode::Random,
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(a, b);
        assert!(a.weapon1.is_some());
        let placed = [a.weapon2.is_some(), a.shield.is_some()];
        assert_eq!(placed.iter().filter(|p| **p).count(), 1);
    }
}
