//! Damage, healing, temporary hit points, and death saves.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::sheet::CharacterRecord;

/// Death save counters, each clamped to 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathSaves {
    /// Successful saves.
    pub successes: u8,
    /// Failed saves.
    pub failures: u8,
}

impl DeathSaves {
    /// Most saves of either kind that count.
    pub const LIMIT: u8 = 3;

    fn add_successes(&mut self, n: u8) {
        self.successes = (self.successes + n).min(Self::LIMIT);
    }

    fn add_failures(&mut self, n: u8) {
        self.failures = (self.failures + n).min(Self::LIMIT);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Where a character stands between life and death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathState {
    /// Above 0 hit points.
    Alive,
    /// At 0 hit points, still rolling death saves.
    Dying,
    /// At 0 hit points with three successes.
    Stable,
    /// Three failures.
    Dead,
}

impl CharacterRecord {
    /// Apply damage. Temporary hit points absorb it first.
    ///
    /// Damage taken while already at 0 hit points counts as one failed
    /// death save. Returns current hit points.
    pub fn take_damage(&mut self, amount: u32) -> i32 {
        if amount == 0 {
            return self.combat.current_hp;
        }
        if self.combat.current_hp == 0 {
            self.death_saves.add_failures(1);
            tracing::debug!(
                name = %self.identity.name,
                failures = self.death_saves.failures,
                "damage at 0 hp"
            );
            return 0;
        }

        let mut remaining = hit_points(amount);
        let absorbed = remaining.min(self.combat.temp_hp);
        self.combat.temp_hp -= absorbed;
        remaining -= absorbed;
        self.combat.current_hp = self.combat.current_hp.saturating_sub(remaining).max(0);
        self.combat.current_hp
    }

    /// Restore hit points up to the maximum. Healing from 0 clears the
    /// death save counters. Returns current hit points.
    pub fn heal(&mut self, amount: u32) -> i32 {
        if amount == 0 || self.death_state() == DeathState::Dead {
            return self.combat.current_hp;
        }
        if self.combat.current_hp == 0 {
            self.death_saves.reset();
        }
        self.combat.current_hp = self
            .combat
            .current_hp
            .saturating_add(hit_points(amount))
            .min(self.combat.max_hp);
        self.combat.current_hp
    }

    /// Grant temporary hit points. They do not stack; the higher value wins.
    pub fn grant_temp_hp(&mut self, amount: u32) -> i32 {
        self.combat.temp_hp = self.combat.temp_hp.max(hit_points(amount));
        self.combat.temp_hp
    }

    /// Record the outcome of a death save rolled outside the engine.
    pub fn record_death_save(&mut self, success: bool) -> DeathState {
        if self.death_state() != DeathState::Dying {
            return self.death_state();
        }
        if success {
            self.death_saves.add_successes(1);
        } else {
            self.death_saves.add_failures(1);
        }
        self.death_state()
    }

    /// Roll a death save: 1 counts as two failures, 20 restores 1 hit
    /// point, 10 or higher succeeds.
    pub fn roll_death_save<R: Rng>(&mut self, rng: &mut R) -> DeathState {
        if self.death_state() != DeathState::Dying {
            return self.death_state();
        }
        match Die::D20.roll(rng) {
            1 => self.death_saves.add_failures(2),
            20 => {
                self.death_saves.reset();
                self.combat.current_hp = 1;
            }
            n if n >= 10 => self.death_saves.add_successes(1),
            _ => self.death_saves.add_failures(1),
        }
        self.death_state()
    }

    /// Current life state.
    pub fn death_state(&self) -> DeathState {
        if self.death_saves.failures >= DeathSaves::LIMIT {
            DeathState::Dead
        } else if self.combat.current_hp > 0 {
            DeathState::Alive
        } else if self.death_saves.successes >= DeathSaves::LIMIT {
            DeathState::Stable
        } else {
            DeathState::Dying
        }
    }
}

/// An unsigned amount as hit points, saturating at `i32::MAX`.
fn hit_points(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::tests::fighter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn huge_amounts_saturate() {
        let mut pc = fighter();
        let max = pc.combat().max_hp;
        pc.take_damage(1);
        assert_eq!(pc.heal(u32::MAX), max);
        pc.take_damage(1);
        assert_eq!(pc.heal(i32::MAX as u32), max);

        pc.grant_temp_hp(4);
        assert_eq!(pc.take_damage(3_000_000_000), 0);
        assert_eq!(pc.combat().temp_hp, 0);
        assert_eq!(pc.death_state(), DeathState::Dying);

        let mut pc = fighter();
        assert_eq!(pc.grant_temp_hp(u32::MAX), i32::MAX);
        assert_eq!(pc.take_damage(u32::MAX), max);
        assert_eq!(pc.combat().temp_hp, 0);
    }

    #[test]
    fn damage_and_heal() {
        let mut pc = fighter();
        let max = pc.combat().max_hp;
        assert_eq!(pc.take_damage(5), max - 5);
        assert_eq!(pc.heal(2), max - 3);
        assert_eq!(pc.heal(100), max);
        assert_eq!(pc.death_state(), DeathState::Alive);
    }

    #[test]
    fn temp_hp_absorbs_first_and_does_not_stack() {
        let mut pc = fighter();
        let max = pc.combat().max_hp;
        pc.grant_temp_hp(5);
        pc.grant_temp_hp(3);
        assert_eq!(pc.combat().temp_hp, 5);
        assert_eq!(pc.take_damage(7), max - 2);
        assert_eq!(pc.combat().temp_hp, 0);
    }

    #[test]
    fn damage_floors_at_zero_then_counts_failures() {
        let mut pc = fighter();
        assert_eq!(pc.take_damage(999), 0);
        assert_eq!(pc.death_state(), DeathState::Dying);
        pc.take_damage(1);
        pc.take_damage(1);
        assert_eq!(pc.death_saves().failures, 2);
        pc.take_damage(1);
        pc.take_damage(1);
        assert_eq!(pc.death_saves().failures, 3);
        assert_eq!(pc.death_state(), DeathState::Dead);
        assert_eq!(pc.heal(10), 0);
    }

    #[test]
    fn three_successes_stabilize() {
        let mut pc = fighter();
        pc.take_damage(999);
        pc.record_death_save(true);
        pc.record_death_save(false);
        pc.record_death_save(true);
        assert_eq!(pc.record_death_save(true), DeathState::Stable);
        // Further saves are ignored once stable.
        assert_eq!(pc.record_death_save(false), DeathState::Stable);
        assert_eq!(pc.death_saves().failures, 1);
    }

    #[test]
    fn healing_from_zero_resets_saves() {
        let mut pc = fighter();
        pc.take_damage(999);
        pc.record_death_save(false);
        assert_eq!(pc.heal(3), 3);
        assert_eq!(*pc.death_saves(), DeathSaves::default());
    }

    #[test]
    fn rolled_death_saves_terminate() {
        let mut pc = fighter();
        pc.take_damage(999);
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = DeathState::Dying;
        for _ in 0..10 {
            state = pc.roll_death_save(&mut rng);
            if state != DeathState::Dying {
                break;
            }
        }
        assert_ne!(state, DeathState::Dying);
        assert!(pc.death_saves().successes <= 3);
        assert!(pc.death_saves().failures <= 3);
    }

    #[test]
    fn death_save_ignored_when_alive() {
        let mut pc = fighter();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(pc.roll_death_save(&mut rng), DeathState::Alive);
        assert_eq!(*pc.death_saves(), DeathSaves::default());
    }
}
