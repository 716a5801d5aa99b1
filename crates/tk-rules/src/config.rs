//! Tunable constants for the rules engine.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Highest level the engine supports.
pub const LEVEL_CAP: u32 = 20;

/// How hit points are gained on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HpGain {
    /// Take the rounded-up average of the hit die.
    #[default]
    Average,
    /// Roll the hit die.
    Roll,
}

/// Configuration for character derivation and progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Level new characters are created at.
    pub starting_level: u32,
    /// Highest level a character can reach.
    pub max_level: u32,
    /// Flat armor class bonus for carrying a shield.
    pub shield_bonus: i32,
    /// Largest dexterity modifier medium armor allows.
    pub medium_armor_dex_cap: i32,
    /// Roll 4d6-drop-lowest in random creation instead of using the
    /// class's recommended array.
    pub roll_ability_scores: bool,
    /// How hit points are gained on level-up.
    pub level_up_hp: HpGain,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_level: 1,
            max_level: LEVEL_CAP,
            shield_bonus: 2,
            medium_armor_dex_cap: 2,
            roll_ability_scores: false,
            level_up_hp: HpGain::Average,
        }
    }
}

impl RulesConfig {
    /// Load a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the level bounds are coherent.
    pub fn validate(&self) -> RulesResult<()> {
        if self.max_level == 0 || self.max_level > LEVEL_CAP {
            return Err(RulesError::InvalidConfig(format!(
                "max_level must be in 1..={LEVEL_CAP}, got {}",
                self.max_level
            )));
        }
        if self.starting_level == 0 || self.starting_level > self.max_level {
            return Err(RulesError::InvalidConfig(format!(
                "starting_level must be in 1..={}, got {}",
                self.max_level, self.starting_level
            )));
        }
        Ok(())
    }

    /// Set the shield bonus.
    pub fn with_shield_bonus(mut self, bonus: i32) -> Self {
        self.shield_bonus = bonus;
        self
    }

    /// Set the medium armor dexterity cap.
    pub fn with_medium_armor_dex_cap(mut self, cap: i32) -> Self {
        self.medium_armor_dex_cap = cap;
        self
    }

    /// Roll ability scores during random creation.
    pub fn with_rolled_abilities(mut self, roll: bool) -> Self {
        self.roll_ability_scores = roll;
        self
    }

    /// Set the level-up hit point method.
    pub fn with_level_up_hp(mut self, gain: HpGain) -> Self {
        self.level_up_hp = gain;
        self
    }

    /// Set the maximum level (clamped to 1-20).
    pub fn with_max_level(mut self, level: u32) -> Self {
        self.max_level = level.clamp(1, LEVEL_CAP);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = RulesConfig::default();
        assert_eq!(cfg.starting_level, 1);
        assert_eq!(cfg.max_level, 20);
        assert_eq!(cfg.shield_bonus, 2);
        assert_eq!(cfg.medium_armor_dex_cap, 2);
        assert!(!cfg.roll_ability_scores);
        assert_eq!(cfg.level_up_hp, HpGain::Average);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = RulesConfig::default()
            .with_shield_bonus(3)
            .with_medium_armor_dex_cap(3)
            .with_rolled_abilities(true)
            .with_level_up_hp(HpGain::Roll)
            .with_max_level(99);
        assert_eq!(cfg.shield_bonus, 3);
        assert_eq!(cfg.medium_armor_dex_cap, 3);
        assert!(cfg.roll_ability_scores);
        assert_eq!(cfg.level_up_hp, HpGain::Roll);
        assert_eq!(cfg.max_level, 20);
    }

    #[test]
    fn from_json_fills_defaults() {
        let cfg = RulesConfig::from_json(r#"{ "shield_bonus": 1, "level_up_hp": "roll" }"#).unwrap();
        assert_eq!(cfg.shield_bonus, 1);
        assert_eq!(cfg.level_up_hp, HpGain::Roll);
        assert_eq!(cfg.max_level, 20);
    }

    #[test]
    fn from_json_rejects_bad_levels() {
        assert!(matches!(
            RulesConfig::from_json(r#"{ "starting_level": 0 }"#),
            Err(RulesError::InvalidConfig(_))
        ));
        assert!(matches!(
            RulesConfig::from_json(r#"{ "max_level": 30 }"#),
            Err(RulesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(matches!(
            RulesConfig::from_json("{ not json"),
            Err(RulesError::Json(_))
        ));
    }
}
